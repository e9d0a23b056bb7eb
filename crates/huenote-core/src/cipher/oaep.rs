//! RSA-OAEP (SHA-256) for short notes.
//!
//! Plaintext is encrypted directly under the public key, so its length is
//! bounded by the modulus. Oversized input is rejected, never chunked.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{NoteError, Result};

/// Modulus size for generated keys.
pub const RSA_BITS: usize = 2048;

/// SHA-256 output length, used by the OAEP overhead computation.
const HASH_LEN: usize = 32;

/// Plaintext bound for keys generated by this module.
pub const MAX_PLAINTEXT_LEN: usize = RSA_BITS / 8 - 2 * HASH_LEN - 2;

/// Largest plaintext OAEP-SHA256 can carry under `key` (190 for 2048-bit).
pub fn max_plaintext_len(key: &RsaPublicKey) -> usize {
    key.size().saturating_sub(2 * HASH_LEN + 2)
}

pub(crate) fn generate() -> Result<RsaPrivateKey> {
    RsaPrivateKey::new(&mut OsRng, RSA_BITS)
        .map_err(|e| NoteError::Encryption(format!("RSA key generation failed: {}", e)))
}

pub(crate) fn encrypt(key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let max = max_plaintext_len(key);
    if plaintext.len() > max {
        return Err(NoteError::Size {
            len: plaintext.len(),
            max,
        });
    }

    key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
        .map_err(|e| NoteError::Encryption(format!("RSA-OAEP encryption failed: {}", e)))
}

pub(crate) fn decrypt(key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    key.decrypt(Oaep::new::<Sha256>(), ciphertext)
        .map_err(|_| NoteError::Decryption)
}
