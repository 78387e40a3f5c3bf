//! Credential hashing with Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! the algorithm, cost and salt travel with the hash and verification needs
//! no other state.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::{FieldCryptError, Result};

/// Length of the random salt in bytes (128 bits).
const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Argon2id cost parameters used for new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 19 456 = 19 MiB).
    pub memory_kib: u32,
    /// Number of iterations (default: 2).
    pub iterations: u32,
    /// Parallelism lanes (default: 1).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Hashes and verifies passwords with a fixed work factor.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Argon2Params,
}

impl CredentialHasher {
    /// Create a hasher, rejecting dangerously weak parameters.
    pub fn new(params: Argon2Params) -> Result<Self> {
        if params.memory_kib < MIN_MEMORY_KIB {
            return Err(FieldCryptError::CryptoBackend(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                params.memory_kib
            )));
        }
        if params.iterations < 1 {
            return Err(FieldCryptError::CryptoBackend(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if params.parallelism < 1 {
            return Err(FieldCryptError::CryptoBackend(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        Ok(Self { params })
    }

    /// The parameters new hashes are produced with.
    pub fn params(&self) -> Argon2Params {
        self.params
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            None,
        )
        .map_err(|e| FieldCryptError::CryptoBackend(format!("invalid Argon2 params: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash `plaintext` under a fresh random salt.
    pub fn hash_password(&self, plaintext: &str) -> Result<String> {
        use rand::TryRngCore;

        let mut salt_bytes = [0u8; SALT_LEN];
        rand::rngs::OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| FieldCryptError::CryptoBackend(format!("OS random source: {e}")))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| FieldCryptError::CryptoBackend(format!("salt encoding: {e}")))?;

        let hash = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| FieldCryptError::CryptoBackend(format!("Argon2id hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// The cost and salt come from `stored_hash`, not from this hasher, so
    /// hashes made under older parameters keep verifying. A wrong password,
    /// or a well-formed hash this backend cannot check, is `Ok(false)`.
    pub fn verify_password(&self, plaintext: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| FieldCryptError::HashFormat(e.to_string()))?;

        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Crypto) => Err(FieldCryptError::CryptoBackend(
                "Argon2 verification failed internally".into(),
            )),
            Err(e) => {
                tracing::debug!(reason = %e, "password did not verify");
                Ok(false)
            }
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Argon2Params::default(),
        }
    }
}

/// Hash a password with the default parameters.
pub fn hash_password(plaintext: &str) -> Result<String> {
    CredentialHasher::default().hash_password(plaintext)
}

/// Verify a password against a stored hash.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool> {
    CredentialHasher::default().verify_password(plaintext, stored_hash)
}
