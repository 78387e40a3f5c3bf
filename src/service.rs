//! `FieldCrypt`: the composition root for field protection.
//!
//! Build one at startup with [`FieldCrypt::from_settings`] (which fails
//! fast on a missing or malformed master key) and hand it to the
//! persistence layer. Every method is `&self` and the type is
//! `Send + Sync`, so one instance can be shared across threads.

use std::sync::Arc;

use crate::config::Settings;
use crate::crypto::{
    CredentialHasher, DeterministicCipher, FieldCipher, MasterKey, RandomizedCipher,
    SivKeyProvider,
};
use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct FieldCrypt {
    hasher: CredentialHasher,
    randomized: RandomizedCipher,
    deterministic: DeterministicCipher,
    keys: Arc<SivKeyProvider>,
}

impl FieldCrypt {
    /// Load the master key and hasher params from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let master = MasterKey::from_settings(settings)?;
        let hasher = CredentialHasher::new(settings.argon2_params())?;
        Ok(Self::with_hasher(master, hasher))
    }

    /// Build from an already-loaded master key with default hasher params.
    pub fn new(master: MasterKey) -> Self {
        Self::with_hasher(master, CredentialHasher::default())
    }

    pub fn with_hasher(master: MasterKey, hasher: CredentialHasher) -> Self {
        let master = Arc::new(master);
        let keys = Arc::new(SivKeyProvider::new(Arc::clone(&master)));
        Self {
            hasher,
            randomized: RandomizedCipher::new(master),
            deterministic: DeterministicCipher::new(Arc::clone(&keys)),
            keys,
        }
    }

    pub fn hash_password(&self, plaintext: &str) -> Result<String> {
        self.hasher.hash_password(plaintext)
    }

    pub fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool> {
        self.hasher.verify_password(plaintext, hash)
    }

    /// Encrypt with a fresh IV; the result differs on every call.
    pub fn encrypt_random(&self, plaintext: &str) -> Result<String> {
        self.randomized.encrypt(plaintext)
    }

    pub fn decrypt_random(&self, payload: &str) -> Result<String> {
        self.randomized.decrypt(payload)
    }

    /// Encrypt so that equal plaintexts give equal ciphertexts.
    pub fn encrypt_deterministic(&self, plaintext: &str) -> Result<String> {
        self.deterministic.encrypt(plaintext)
    }

    pub fn decrypt_deterministic(&self, payload: &str) -> Result<String> {
        self.deterministic.decrypt(payload)
    }

    /// Whether a stored deterministic ciphertext encrypts `plaintext`.
    pub fn deterministic_matches(&self, plaintext: &str, stored: &str) -> Result<bool> {
        self.deterministic.matches(plaintext, stored)
    }

    pub fn randomized(&self) -> &RandomizedCipher {
        &self.randomized
    }

    pub fn deterministic(&self) -> &DeterministicCipher {
        &self.deterministic
    }

    /// The derived-key cache shared by the deterministic cipher.
    pub fn key_provider(&self) -> &Arc<SivKeyProvider> {
        &self.keys
    }
}
