//! HKDF-SHA256 derivation of the deterministic-cipher key, and the cache
//! that holds it.
//!
//! The derived key is a pure function of the master key, so it is computed
//! at most once per provider. Concurrent first callers may each derive it;
//! they all get the same bytes and the last store wins.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::keys::MasterKey;
use crate::errors::{FieldCryptError, Result};

/// Length of the AES-SIV key (two AES-256 keys: one for S2V, one for CTR).
pub const SIV_KEY_LEN: usize = 64;

/// Fixed HKDF salt for the deterministic field key.
const SIV_SALT: &[u8] = b"fieldcrypt.siv.salt.v1";

/// Fixed HKDF info binding the output to its single use.
const SIV_INFO: &[u8] = b"fieldcrypt.siv.field-key";

/// The 64-byte sub-key used by the deterministic cipher.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedSivKey {
    bytes: [u8; SIV_KEY_LEN],
}

impl DerivedSivKey {
    pub fn as_bytes(&self) -> &[u8; SIV_KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedSivKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedSivKey([REDACTED])")
    }
}

/// Run HKDF-SHA256 over the master key with the fixed salt and info.
pub fn derive_siv_key(master: &MasterKey) -> Result<DerivedSivKey> {
    let hk = Hkdf::<Sha256>::new(Some(SIV_SALT), master.as_bytes());

    let mut okm = [0u8; SIV_KEY_LEN];
    hk.expand(SIV_INFO, &mut okm)
        .map_err(|e| FieldCryptError::CryptoBackend(format!("HKDF expand failed: {e}")))?;

    let key = DerivedSivKey { bytes: okm };
    okm.zeroize();
    Ok(key)
}

/// Owns the master key handle and a memoized [`DerivedSivKey`].
///
/// Build one at the composition root and share it by `Arc`.
#[derive(Debug)]
pub struct SivKeyProvider {
    master: Arc<MasterKey>,
    cached: ArcSwapOption<DerivedSivKey>,
}

impl SivKeyProvider {
    pub fn new(master: Arc<MasterKey>) -> Self {
        Self {
            master,
            cached: ArcSwapOption::empty(),
        }
    }

    /// Return the derived key, deriving and caching it on first use.
    ///
    /// A failed derivation leaves the cache empty so the next call retries.
    pub fn key(&self) -> Result<Arc<DerivedSivKey>> {
        if let Some(key) = self.cached.load_full() {
            return Ok(key);
        }

        let key = Arc::new(derive_siv_key(&self.master)?);
        self.cached.store(Some(Arc::clone(&key)));
        tracing::debug!("deterministic field key derived");
        Ok(key)
    }

    /// Whether a derived key is currently cached.
    pub fn is_derived(&self) -> bool {
        self.cached.load().is_some()
    }

    /// Drop the cached key; the next [`key`](Self::key) call derives again.
    pub fn reset(&self) {
        self.cached.store(None);
        tracing::debug!("deterministic field key cache cleared");
    }
}
