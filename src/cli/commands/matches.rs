//! `fieldcrypt matches`: compare a value against a deterministic payload.

use crate::cli::output;
use crate::cli::{build_service, read_secret, Cli};
use crate::errors::{FieldCryptError, Result};

/// Execute the `matches` command.
pub fn execute(cli: &Cli, stored: &str, value: Option<&str>) -> Result<()> {
    let service = build_service(cli)?;
    let value = read_secret(value, "Value to compare")?;

    if service.deterministic_matches(&value, stored)? {
        output::success("Stored value matches.");
        Ok(())
    } else {
        Err(FieldCryptError::CommandFailed(
            "stored value does not match".into(),
        ))
    }
}
