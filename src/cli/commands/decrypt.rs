//! `fieldcrypt decrypt`: recover the plaintext of a stored value.

use crate::cli::{build_service, Cli};
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, payload: &str, deterministic: bool) -> Result<()> {
    let service = build_service(cli)?;

    let plaintext = if deterministic {
        service.decrypt_deterministic(payload)?
    } else {
        service.decrypt_random(payload)?
    };
    println!("{plaintext}");

    Ok(())
}
