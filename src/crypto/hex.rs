//! Strict hex encoding for persisted payloads.
//!
//! Output is always lowercase. Input may be either case, but must have an
//! even length and contain only `[0-9a-fA-F]`.

use crate::errors::{FieldCryptError, Result};

/// Encode `bytes` as lowercase hex, two characters per byte.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string back into bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| FieldCryptError::MalformedEncoding(e.to_string()))
}
