//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The supplied key cannot play the requested role (e.g. encrypting with
    /// a public-only key). This is a caller bug and is never retried.
    #[error("key error: {0}")]
    Key(String),

    /// PEM input could not be parsed as an RSA key.
    #[error("invalid key format: {0}")]
    KeyFormat(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (malformed envelope, wrong key or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CryptoError {
    pub(crate) fn decryption(msg: &str) -> Self {
        Self::Decryption(msg.to_string())
    }
}
