//! `fieldcrypt encrypt`: protect a value for storage.

use crate::cli::output;
use crate::cli::{build_service, read_secret, Cli};
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, value: Option<&str>, deterministic: bool) -> Result<()> {
    let service = build_service(cli)?;
    let value = read_secret(value, "Value to encrypt")?;

    let payload = if deterministic {
        service.encrypt_deterministic(&value)?
    } else {
        service.encrypt_random(&value)?
    };

    if payload.is_empty() {
        output::tip("Empty values are stored as-is.");
    }
    println!("{payload}");

    Ok(())
}
