//! `fieldcrypt hash`: produce an Argon2id PHC hash for a password.

use crate::cli::{build_hasher, read_secret, Cli};
use crate::errors::Result;

/// Execute the `hash` command.
pub fn execute(cli: &Cli, password: Option<&str>) -> Result<()> {
    let hasher = build_hasher(cli)?;
    let password = read_secret(password, "Password to hash")?;

    let hash = hasher.hash_password(&password)?;
    println!("{hash}");

    Ok(())
}
