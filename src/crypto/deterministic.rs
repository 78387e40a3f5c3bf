//! Deterministic field encryption with AES-SIV (RFC 5297).
//!
//! The same plaintext under the same master key always produces the same
//! hex string, so a stored column can be matched against a query value
//! without decrypting anything. The price is that equal values are visible
//! as equal ciphertexts; only use this for fields where that is acceptable.
//!
//! Stored layout: `hex(SIV tag (16 bytes) || ciphertext)`.

use std::sync::Arc;

use aes_siv::aead::KeyInit;
use aes_siv::siv::Aes256Siv;
use subtle::ConstantTimeEq;

use super::derivation::SivKeyProvider;
use super::field::{passthrough_empty, FieldCipher};
use super::hex::{decode_hex, encode_hex};
use crate::errors::{FieldCryptError, Result};

/// No associated data is bound into the SIV.
const NO_HEADERS: [&[u8]; 0] = [];

/// Deterministic AEAD cipher keyed by the derived SIV key.
#[derive(Debug, Clone)]
pub struct DeterministicCipher {
    keys: Arc<SivKeyProvider>,
}

impl DeterministicCipher {
    pub fn new(keys: Arc<SivKeyProvider>) -> Self {
        Self { keys }
    }

    fn cipher(&self) -> Result<Aes256Siv> {
        let key = self.keys.key()?;
        Aes256Siv::new_from_slice(key.as_bytes())
            .map_err(|e| FieldCryptError::CryptoBackend(format!("invalid SIV key length: {e}")))
    }

    fn seal(&self, plaintext: &str) -> Result<String> {
        let sealed = self
            .cipher()?
            .encrypt(NO_HEADERS, plaintext.as_bytes())
            .map_err(|e| FieldCryptError::CryptoBackend(format!("SIV encryption error: {e}")))?;
        Ok(encode_hex(&sealed))
    }

    fn open(&self, payload: &str) -> Result<String> {
        let sealed = decode_hex(payload).map_err(|_| FieldCryptError::Decryption)?;
        let plaintext = self
            .cipher()?
            .decrypt(NO_HEADERS, &sealed)
            .map_err(|_| FieldCryptError::Decryption)?;
        String::from_utf8(plaintext).map_err(|_| FieldCryptError::Decryption)
    }

    /// Whether `stored` is the deterministic encryption of `plaintext`.
    ///
    /// Compares decoded bytes in constant time. A stored value that is not
    /// valid hex never matches.
    pub fn matches(&self, plaintext: &str, stored: &str) -> Result<bool> {
        let expected = self.encrypt(plaintext)?;
        if expected.is_empty() || stored.is_empty() {
            return Ok(expected.is_empty() && stored.is_empty());
        }
        let Ok(stored) = decode_hex(stored) else {
            return Ok(false);
        };
        let expected = decode_hex(&expected)?;
        Ok(expected.ct_eq(&stored).into())
    }
}

impl FieldCipher for DeterministicCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String> {
        passthrough_empty(plaintext, |p| self.seal(p))
    }

    fn decrypt(&self, payload: &str) -> Result<String> {
        passthrough_empty(payload, |p| self.open(p))
    }
}
