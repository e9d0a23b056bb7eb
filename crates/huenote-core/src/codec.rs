//! Hex codec for storable ciphertext.
//!
//! The cipher and key derivation layers only ever see raw bytes; this module
//! is the single place where bytes become text and back.

use crate::error::{NoteError, Result};

/// Encode bytes as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string into bytes.
///
/// Fails on odd-length input or any non-hex character; never truncates.
/// The empty string decodes to an empty vector.
///
/// # Examples
///
/// ```
/// use huenote_core::codec::{decode, encode};
///
/// let text = encode(&[0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(text, "deadbeef");
/// assert_eq!(decode(&text).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
/// assert!(decode("abc").is_err());
/// ```
pub fn decode(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| NoteError::Encoding(format!("Invalid hex: {}", e)))
}

/// Decode a stored nonce field, where `""` means "no nonce".
pub fn decode_nonce(text: &str) -> Result<Option<Vec<u8>>> {
    if text.is_empty() {
        return Ok(None);
    }
    decode(text).map(Some)
}

/// Encode an optional nonce, using `""` for `None`.
pub fn encode_nonce(nonce: Option<&[u8]>) -> String {
    nonce.map(encode).unwrap_or_default()
}
