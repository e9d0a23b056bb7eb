//! Error types for Huenote core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer will map these
//! to user-friendly messages.
//!
//! `Decryption` deliberately carries no detail: a wrong passphrase, a wrong
//! color order, a tampered payload and a mismatched algorithm tag all look
//! the same to the caller.

use thiserror::Error;

/// Result type alias for Huenote operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Core error type for Huenote operations.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Missing or malformed title, passphrase, body or color sequence
    #[error("Validation error: {0}")]
    Validation(String),

    /// Plaintext exceeds what the asymmetric algorithm can encrypt
    #[error("Plaintext too large: {len} bytes (maximum {max})")]
    Size { len: usize, max: usize },

    /// Malformed hex or inconsistent encoded fields in a stored record
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Key derivation provider failure
    #[error("Key derivation failed: {0}")]
    Derivation(String),

    /// Provider failure while encrypting or generating keys
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Any decryption failure
    #[error("Decryption failed")]
    Decryption,

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl NoteError {
    /// Whether this error is the generic decryption failure.
    pub fn is_decryption(&self) -> bool {
        matches!(self, NoteError::Decryption)
    }
}
