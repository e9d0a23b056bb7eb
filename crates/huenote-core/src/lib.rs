//! # Huenote Core
//!
//! Core library for Huenote - encrypted notes unlocked by a passphrase and
//! an ordered sequence of three colors.
//!
//! This crate provides the encryption engine, the note record, and storage
//! abstractions independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **codec**: bytes <-> hex text for storable ciphertext
//! - **palette**: the 15-color palette and `ColorSequence`
//! - **crypto**: PBKDF2 key derivation from passphrase + colors
//! - **cipher**: AES-GCM, RSA-OAEP and ECC encryption behind one `Algorithm`
//! - **note**: `NoteRecord` and its JSON shape
//! - **service**: `NoteCipher`, the encrypt/decrypt entry points
//! - **storage**: repository and key vault traits, memory and SQLite backends,
//!   JSON export

pub mod cipher;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod note;
pub mod palette;
pub mod service;
pub mod storage;

pub use cipher::{Algorithm, AsymmetricKeyPair, EncryptedPayload, KeyMaterial};
pub use error::{NoteError, Result};
pub use note::NoteRecord;
pub use palette::{ColorSequence, PaletteColor};
pub use service::NoteCipher;
pub use storage::{NoteFilter, NoteRepository, PrivateKeyVault};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
