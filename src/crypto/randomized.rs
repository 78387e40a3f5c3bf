//! AES-256-GCM field encryption with a fresh random IV per call.
//!
//! Stored layout (all lowercase hex):
//!
//! ```text
//! <iv: 16 bytes>:<auth tag: 16 bytes>:<ciphertext>
//! ```
//!
//! Encrypting the same value twice gives two different payloads, so this
//! scheme cannot be searched. Use it for anything that only needs to be
//! read back.

use std::fmt;
use std::sync::Arc;

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};

use super::field::{passthrough_empty, FieldCipher};
use super::hex::{decode_hex, encode_hex};
use super::keys::MasterKey;
use crate::errors::{FieldCryptError, Result};

/// AES-256-GCM with a 128-bit IV and a 128-bit tag.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Size of the IV in bytes.
pub const IV_LEN: usize = 16;

/// Size of the authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Number of `:`-delimited segments in a payload.
const MIN_SEGMENTS: usize = 3;

/// A parsed randomized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomizedPayload {
    pub iv: Vec<u8>,
    pub tag: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl RandomizedPayload {
    /// Split a stored payload into its IV, tag and ciphertext.
    ///
    /// Segments after the second `:` are rejoined with `:` before decoding,
    /// which matches how older payloads were read. Since hex never contains
    /// `:`, a rejoined tail always fails to decode.
    pub fn parse(payload: &str) -> Result<Self> {
        let segments: Vec<&str> = payload.split(':').collect();
        if segments.len() < MIN_SEGMENTS {
            return Err(FieldCryptError::InvalidCiphertextFormat {
                segments: segments.len(),
            });
        }

        let ciphertext_hex = segments[2..].join(":");
        let iv = decode_hex(segments[0]).map_err(|_| FieldCryptError::Decryption)?;
        let tag = decode_hex(segments[1]).map_err(|_| FieldCryptError::Decryption)?;
        let ciphertext = decode_hex(&ciphertext_hex).map_err(|_| FieldCryptError::Decryption)?;

        if iv.len() != IV_LEN || tag.len() != TAG_LEN {
            return Err(FieldCryptError::Decryption);
        }

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }
}

impl fmt::Display for RandomizedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            encode_hex(&self.iv),
            encode_hex(&self.tag),
            encode_hex(&self.ciphertext)
        )
    }
}

/// Randomized AEAD cipher keyed directly by the master key.
#[derive(Debug, Clone)]
pub struct RandomizedCipher {
    key: Arc<MasterKey>,
}

impl RandomizedCipher {
    pub fn new(key: Arc<MasterKey>) -> Self {
        Self { key }
    }

    fn cipher(&self) -> Result<Aes256Gcm16> {
        Aes256Gcm16::new_from_slice(self.key.as_bytes())
            .map_err(|e| FieldCryptError::CryptoBackend(format!("invalid key length: {e}")))
    }

    fn seal(&self, plaintext: &str) -> Result<String> {
        use rand::TryRngCore;

        let mut iv = [0u8; IV_LEN];
        rand::rngs::OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| FieldCryptError::CryptoBackend(format!("OS random source: {e}")))?;

        let mut sealed = self
            .cipher()?
            .encrypt(Nonce::<U16>::from_slice(&iv), plaintext.as_bytes())
            .map_err(|e| FieldCryptError::CryptoBackend(format!("encryption error: {e}")))?;

        // The AEAD output is ciphertext || tag.
        if sealed.len() < TAG_LEN {
            return Err(FieldCryptError::CryptoBackend(
                "ciphertext shorter than authentication tag".into(),
            ));
        }
        let tag = sealed.split_off(sealed.len() - TAG_LEN);

        Ok(RandomizedPayload {
            iv: iv.to_vec(),
            tag,
            ciphertext: sealed,
        }
        .to_string())
    }

    fn open(&self, payload: &str) -> Result<String> {
        let parsed = RandomizedPayload::parse(payload)?;

        let mut combined = Vec::with_capacity(parsed.ciphertext.len() + TAG_LEN);
        combined.extend_from_slice(&parsed.ciphertext);
        combined.extend_from_slice(&parsed.tag);

        let plaintext = self
            .cipher()?
            .decrypt(Nonce::<U16>::from_slice(&parsed.iv), combined.as_ref())
            .map_err(|_| FieldCryptError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| FieldCryptError::Decryption)
    }
}

impl FieldCipher for RandomizedCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String> {
        passthrough_empty(plaintext, |p| self.seal(p))
    }

    fn decrypt(&self, payload: &str) -> Result<String> {
        passthrough_empty(payload, |p| self.open(p))
    }
}
