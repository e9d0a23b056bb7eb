//! Key derivation for Huenote.
//!
//! This module turns the two user factors into symmetric key material:
//! - **Passphrase**: free text, must not be empty
//! - **Color sequence**: three palette colors, order significant
//!
//! ## Security Model
//!
//! - PBKDF2-HMAC-SHA256, 100 000 iterations, fixed application salt
//! - The combined secret and the derived key are zeroized on drop
//! - Nothing derived here is ever persisted or logged
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the note store
//! - Guessing the colors as an unordered set
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Precomputation against the shared application salt

pub mod key;
pub mod passphrase;

pub use key::{derive_key, derive_key_async, DerivedKey, KEY_LENGTH};
pub use passphrase::{validate_colors, validate_passphrase};
