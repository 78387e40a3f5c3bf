//! Field-level protection for application data at rest: Argon2id password
//! hashing, randomized AES-256-GCM for recoverable secrets, and
//! deterministic AES-SIV for fields that must support equality lookups.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod service;

pub use errors::{FieldCryptError, Result};
pub use service::FieldCrypt;
