//! `fieldcrypt keygen`: print a fresh master key.

use crate::cli::output;
use crate::crypto::{encode_hex, MasterKey};
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute() -> Result<()> {
    let key = MasterKey::generate()?;
    println!("{}", encode_hex(key.as_bytes()));

    output::tip("Store this in FIELD_ENCRYPTION_KEY and set key_encoding = \"hex\".");
    Ok(())
}
