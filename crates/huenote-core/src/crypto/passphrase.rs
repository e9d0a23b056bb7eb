//! Passphrase validation and the combined derivation secret.

use zeroize::Zeroizing;

use crate::error::{NoteError, Result};
use crate::palette::SEQUENCE_LEN;

/// Validate that a passphrase is usable.
///
/// The only requirement is that it is not empty or whitespace.
///
/// # Examples
///
/// ```
/// use huenote_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("hello").is_ok());
/// assert!(validate_passphrase("   ").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(NoteError::Validation(
            "Passphrase cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a color list has exactly the required length.
pub fn validate_colors<S: AsRef<str>>(colors: &[S]) -> Result<()> {
    if colors.len() != SEQUENCE_LEN {
        return Err(NoteError::Validation(format!(
            "Color sequence must have exactly {} colors (got {})",
            SEQUENCE_LEN,
            colors.len()
        )));
    }
    Ok(())
}

/// Concatenate the passphrase and colors, in the order given.
///
/// Colors are neither sorted, deduplicated nor case-folded.
pub(crate) fn combined_secret<S: AsRef<str>>(passphrase: &str, colors: &[S]) -> Zeroizing<String> {
    let capacity = passphrase.len() + colors.iter().map(|c| c.as_ref().len()).sum::<usize>();
    let mut secret = Zeroizing::new(String::with_capacity(capacity));
    secret.push_str(passphrase);
    for color in colors {
        secret.push_str(color.as_ref());
    }
    secret
}
