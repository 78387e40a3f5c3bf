//! `fieldcrypt verify`: check a password against a stored hash.

use crate::cli::output;
use crate::cli::{build_hasher, read_secret, Cli};
use crate::errors::{FieldCryptError, Result};

/// Execute the `verify` command.
///
/// A mismatch is reported as a failed command so scripts can rely on the
/// exit status.
pub fn execute(cli: &Cli, hash: &str, password: Option<&str>) -> Result<()> {
    let hasher = build_hasher(cli)?;
    let password = read_secret(password, "Password to check")?;

    if hasher.verify_password(&password, hash)? {
        output::success("Password matches.");
        Ok(())
    } else {
        Err(FieldCryptError::CommandFailed(
            "password does not match".into(),
        ))
    }
}
