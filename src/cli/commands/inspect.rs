//! `fieldcrypt inspect`: describe a stored payload without a key.
//!
//! Randomized payloads are recognised by their `:` separators; anything
//! else is treated as a deterministic payload.

use crate::cli::output;
use crate::crypto::{decode_hex, RandomizedPayload};
use crate::errors::{FieldCryptError, Result};

/// Size of the AES-SIV synthetic IV at the front of a deterministic payload.
const SIV_TAG_LEN: usize = 16;

/// Execute the `inspect` command.
pub fn execute(payload: &str) -> Result<()> {
    if payload.is_empty() {
        output::info("Empty value: stored unprotected.");
        return Ok(());
    }

    output::print_fields_table(&describe(payload)?);
    Ok(())
}

/// Build the (field, value) rows shown for `payload`.
fn describe(payload: &str) -> Result<Vec<(&'static str, String)>> {
    if payload.contains(':') {
        let parsed = RandomizedPayload::parse(payload)?;
        return Ok(vec![
            ("Scheme", "randomized (AES-256-GCM)".to_string()),
            ("IV", format!("{} bytes", parsed.iv.len())),
            ("Auth tag", format!("{} bytes", parsed.tag.len())),
            ("Ciphertext", format!("{} bytes", parsed.ciphertext.len())),
            ("Searchable", "no".to_string()),
        ]);
    }

    let bytes = decode_hex(payload)?;
    if bytes.len() < SIV_TAG_LEN {
        return Err(FieldCryptError::CommandFailed(format!(
            "payload is {} bytes, too short for a deterministic value",
            bytes.len()
        )));
    }
    Ok(vec![
        ("Scheme", "deterministic (AES-SIV)".to_string()),
        ("Synthetic IV", format!("{SIV_TAG_LEN} bytes")),
        ("Ciphertext", format!("{} bytes", bytes.len() - SIV_TAG_LEN)),
        ("Searchable", "yes".to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_randomized_payload() {
        let payload = format!("{}:{}:{}", "00".repeat(16), "11".repeat(16), "22".repeat(5));
        let rows = describe(&payload).unwrap();
        assert_eq!(rows[0].1, "randomized (AES-256-GCM)");
        assert_eq!(rows[3].1, "5 bytes");
    }

    #[test]
    fn describes_deterministic_payload() {
        let rows = describe(&"ab".repeat(20)).unwrap();
        assert_eq!(rows[0].1, "deterministic (AES-SIV)");
        assert_eq!(rows[2].1, "4 bytes");
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(matches!(
            describe("a:b"),
            Err(FieldCryptError::InvalidCiphertextFormat { segments: 2 })
        ));
        assert!(matches!(describe("xyz"), Err(FieldCryptError::MalformedEncoding(_))));
        assert!(describe("abcd").is_err());
    }
}
