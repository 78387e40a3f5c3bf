use thiserror::Error;

/// All errors that can occur in fieldcrypt.
///
/// None of the messages carry plaintext or key material.
#[derive(Debug, Error)]
pub enum FieldCryptError {
    // --- Startup errors ---
    #[error("Configuration error: {0}")]
    Configuration(String),

    // --- Encoding errors ---
    #[error("Malformed hex encoding: {0}")]
    MalformedEncoding(String),

    #[error("Invalid ciphertext format: expected iv:tag:ciphertext, got {segments} segment(s)")]
    InvalidCiphertextFormat { segments: usize },

    // --- Crypto errors ---
    #[error("Decryption failed: wrong key or corrupted data")]
    Decryption,

    #[error("Crypto backend failure: {0}")]
    CryptoBackend(String),

    #[error("Invalid password hash: {0}")]
    HashFormat(String),

    // --- CLI errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for fieldcrypt results.
pub type Result<T> = std::result::Result<T, FieldCryptError>;
