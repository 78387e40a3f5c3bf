//! Cryptographic primitives for fieldcrypt.
//!
//! This module provides:
//! - Strict hex encoding for stored payloads (`hex`)
//! - Master key loading and the hex-vs-raw heuristic (`keys`)
//! - Argon2id password hashing (`password`)
//! - The `FieldCipher` seam and empty-string passthrough (`field`)
//! - AES-256-GCM randomized field encryption (`randomized`)
//! - HKDF derivation and caching of the SIV key (`derivation`)
//! - AES-SIV deterministic field encryption (`deterministic`)

pub mod derivation;
pub mod deterministic;
pub mod field;
pub mod hex;
pub mod keys;
pub mod password;
pub mod randomized;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{MasterKey, RandomizedCipher, FieldCipher, ...};
pub use derivation::{derive_siv_key, DerivedSivKey, SivKeyProvider};
pub use deterministic::DeterministicCipher;
pub use field::FieldCipher;
pub use self::hex::{decode_hex, encode_hex};
pub use keys::{decode_key_material, load_key, KeyEncoding, MasterKey, KEY_LEN};
pub use password::{hash_password, verify_password, Argon2Params, CredentialHasher};
pub use randomized::{RandomizedCipher, RandomizedPayload};
