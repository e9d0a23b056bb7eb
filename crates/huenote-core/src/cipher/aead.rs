//! AES-256-GCM sealing with a fresh random nonce per call.
//!
//! Output format: ciphertext || tag (16 bytes). The 96-bit nonce is returned
//! separately and travels in the note's `iv` field.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{NoteError, Result};

/// Size of the AES-GCM nonce
pub const NONCE_LEN: usize = 12;
/// Size of the AES-GCM authentication tag
pub const TAG_LEN: usize = 16;
/// Size of an AES-256 key
pub const AES_KEY_LEN: usize = 32;

/// Draw a nonce from the OS random source.
pub(crate) fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt under a freshly drawn nonce. Returns `(ciphertext, nonce)`.
pub(crate) fn seal(
    key: &[u8; AES_KEY_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let nonce = generate_nonce();
    let ciphertext = seal_with_nonce(key, &nonce, plaintext, aad)?;
    Ok((ciphertext, nonce))
}

/// Encrypt under a caller-chosen nonce.
///
/// Only [`seal`] should reach this outside of tests; reusing a nonce with
/// the same key breaks both confidentiality and integrity.
pub(crate) fn seal_with_nonce(
    key: &[u8; AES_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| NoteError::Encryption(format!("Invalid AES key: {}", e)))?;

    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| NoteError::Encryption("AES-GCM encryption failed".to_string()))
}

/// Decrypt and authenticate. Every failure is `NoteError::Decryption`.
pub(crate) fn open(
    key: &[u8; AES_KEY_LEN],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN || ciphertext.len() < TAG_LEN {
        return Err(NoteError::Decryption);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| NoteError::Decryption)?;
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| NoteError::Decryption)
}
