//! Master key loading.
//!
//! The master key arrives as a single configuration string that may be
//! either hex-encoded or raw text. `load_key` resolves it with a best-effort
//! heuristic; new deployments should set `key_encoding` explicitly so the
//! string is never ambiguous.

use std::env::VarError;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::hex::decode_hex;
use crate::config::Settings;
use crate::errors::{FieldCryptError, Result};

/// Length of the master key (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Development-only master key, used when `allow_dev_fallback` is set and the
/// key variable is missing.
pub const DEV_FALLBACK_KEY: &str = "fieldcrypt-dev-key-do-not-deploy";

/// How a master key string should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// Hex if the string looks like hex of the right length, raw otherwise.
    #[default]
    Auto,
    /// The string must be valid hex.
    Hex,
    /// The string's UTF-8 bytes are the key.
    Raw,
}

/// Resolve key bytes from an environment value with an optional fallback.
///
/// Resolution order is `env_value` (when non-empty), then `fallback`, then an
/// empty vector. An empty result means no key was configured and must be
/// treated as fatal by the caller. The length is not checked here.
pub fn load_key(env_value: Option<&str>, expected_len: usize, fallback: Option<&str>) -> Vec<u8> {
    let Some(value) = select_key_source(env_value, fallback) else {
        return Vec::new();
    };
    detect_key_bytes(value, expected_len)
}

/// Pick the key string: a non-empty `env_value`, else `fallback`.
fn select_key_source<'a>(env_value: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    env_value.filter(|v| !v.is_empty()).or(fallback)
}

/// Decode key material with an explicit encoding.
pub fn decode_key_material(value: &str, expected_len: usize, encoding: KeyEncoding) -> Result<Vec<u8>> {
    match encoding {
        KeyEncoding::Auto => Ok(detect_key_bytes(value, expected_len)),
        KeyEncoding::Hex => decode_hex(value),
        KeyEncoding::Raw => Ok(value.as_bytes().to_vec()),
    }
}

/// A string of exactly `expected_len * 2` characters that decodes to
/// `expected_len` bytes is hex; anything else is taken as raw UTF-8.
fn detect_key_bytes(value: &str, expected_len: usize) -> Vec<u8> {
    if value.chars().count() == expected_len * 2 {
        if let Ok(bytes) = decode_hex(value) {
            if bytes.len() == expected_len {
                return bytes;
            }
        }
    }
    value.as_bytes().to_vec()
}

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Build a master key from raw bytes, which must be exactly [`KEY_LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LEN {
            return Err(FieldCryptError::Configuration(format!(
                "master key must be exactly {KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Load the master key from the environment variable named in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let value = match std::env::var(&settings.key_env) {
            Ok(value) => Some(Zeroizing::new(value)),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                return Err(FieldCryptError::Configuration(format!(
                    "master key variable {} is not valid UTF-8",
                    settings.key_env
                )));
            }
        };
        Self::resolve(value.as_deref().map(String::as_str), settings)
    }

    /// Resolve the master key from an already-read environment value.
    pub fn resolve(env_value: Option<&str>, settings: &Settings) -> Result<Self> {
        let fallback = settings.allow_dev_fallback.then_some(DEV_FALLBACK_KEY);
        let Some(source) = select_key_source(env_value, fallback) else {
            return Err(FieldCryptError::Configuration(format!(
                "master key variable {} is not set",
                settings.key_env
            )));
        };

        if env_value.is_some_and(|v| !v.is_empty()) {
            tracing::debug!(var = %settings.key_env, "master key read from environment");
        } else {
            tracing::warn!(
                var = %settings.key_env,
                "master key not set, using the development fallback key"
            );
        }

        let bytes = decode_key_material(source, KEY_LEN, settings.key_encoding)
            .map(Zeroizing::new)
            .map_err(|e| {
                FieldCryptError::Configuration(format!(
                    "master key in {} cannot be decoded: {e}",
                    settings.key_env
                ))
            })?;

        Self::from_bytes(&bytes)
    }

    /// Generate a fresh random master key.
    pub fn generate() -> Result<Self> {
        use rand::TryRngCore;

        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| FieldCryptError::CryptoBackend(format!("OS random source: {e}")))?;
        let key = Self { bytes };
        bytes.zeroize();
        Ok(key)
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}
