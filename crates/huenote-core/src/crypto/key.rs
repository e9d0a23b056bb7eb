//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The derived key is a function of the passphrase and the color sequence
//! in the order given. Salt and iteration count are fixed application-wide
//! so that a note can be reopened from nothing but its two factors.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::passphrase::{combined_secret, validate_colors, validate_passphrase};
use crate::error::{NoteError, Result};

/// Application-wide derivation salt.
pub const DERIVATION_SALT: &[u8] = b"secure-notepad-salt";

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from a passphrase and color sequence.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase and an ordered color list.
///
/// # Arguments
///
/// * `passphrase` - The passphrase (must not be empty)
/// * `colors` - Exactly three color identifiers, used verbatim and in order
///
/// # Errors
///
/// Returns `NoteError::Validation` before any hashing if the passphrase is
/// empty or the color list is not exactly three long, and
/// `NoteError::Derivation` if the KDF itself fails.
///
/// # Examples
///
/// ```
/// use huenote_core::crypto::derive_key;
///
/// let forward = derive_key("hello", &["#FF0000", "#00FF00", "#0000FF"]).unwrap();
/// let reverse = derive_key("hello", &["#0000FF", "#00FF00", "#FF0000"]).unwrap();
/// assert_ne!(forward.as_bytes(), reverse.as_bytes());
/// ```
pub fn derive_key<S: AsRef<str>>(passphrase: &str, colors: &[S]) -> Result<DerivedKey> {
    validate_passphrase(passphrase)?;
    validate_colors(colors)?;

    let secret = combined_secret(passphrase, colors);
    let mut key_bytes = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(
        secret.as_bytes(),
        DERIVATION_SALT,
        PBKDF2_ITERATIONS,
        &mut key_bytes[..],
    )
    .map_err(|e| NoteError::Derivation(format!("PBKDF2 failed: {}", e)))?;

    tracing::debug!(iterations = PBKDF2_ITERATIONS, "derived note key");
    Ok(DerivedKey::from_bytes(*key_bytes))
}

/// Derive a key on the blocking thread pool.
///
/// Inputs are validated before the task is spawned, so validation errors
/// never pay for a thread hop.
pub async fn derive_key_async<S: AsRef<str>>(passphrase: &str, colors: &[S]) -> Result<DerivedKey> {
    validate_passphrase(passphrase)?;
    validate_colors(colors)?;

    let passphrase = Zeroizing::new(passphrase.to_string());
    let colors: Vec<String> = colors.iter().map(|c| c.as_ref().to_string()).collect();
    tokio::task::spawn_blocking(move || derive_key(&passphrase, &colors))
        .await
        .map_err(|e| NoteError::Derivation(format!("Derivation task failed: {}", e)))?
}
