//! The seam shared by the two field ciphers.

use crate::errors::Result;

/// Reversible protection for a single stored string field.
///
/// Both implementations pass the empty string through untouched in both
/// directions, so "no value" and "not yet protected" look the same to callers.
pub trait FieldCipher: Send + Sync {
    /// Protect `plaintext` for storage.
    fn encrypt(&self, plaintext: &str) -> Result<String>;

    /// Recover the plaintext of a stored value.
    fn decrypt(&self, payload: &str) -> Result<String>;
}

/// Apply `op` unless `input` is empty, in which case return it as-is.
pub(crate) fn passthrough_empty<F>(input: &str, op: F) -> Result<String>
where
    F: FnOnce(&str) -> Result<String>,
{
    if input.is_empty() {
        return Ok(String::new());
    }
    op(input)
}
