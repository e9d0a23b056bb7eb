//! Hybrid encryption using P-256 ECDH + AES-256-GCM
//!
//! - Sender generates an ephemeral P-256 keypair per note
//! - Derives a shared secret via ECDH with the recipient's public key
//! - Derives the AES key via HKDF-SHA256
//! - Encrypts with AES-256-GCM, binding the ephemeral point as AAD
//!
//! Ciphertext format: [ephemeral_point:65][ciphertext][tag:16]; the nonce
//! travels separately like the plain AES-GCM path.

use hkdf::Hkdf;
use p256::ecdh::EphemeralSecret;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::aead::{self, AES_KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::error::{NoteError, Result};

/// Size of an uncompressed SEC1 P-256 point
pub const POINT_LEN: usize = 65;

/// HKDF info string for key derivation
const HKDF_INFO: &[u8] = b"huenote-ecc-note";

fn derive_aes_key(shared_secret: &[u8]) -> Option<Zeroizing<[u8; AES_KEY_LEN]>> {
    let hk = Hkdf::<Sha256>::new(None, shared_secret);
    let mut aes_key = Zeroizing::new([0u8; AES_KEY_LEN]);
    hk.expand(HKDF_INFO, &mut aes_key[..]).ok()?;
    Some(aes_key)
}

pub(crate) fn generate() -> SecretKey {
    SecretKey::random(&mut OsRng)
}

/// Seal for a recipient. Returns `(point || ciphertext, nonce)`.
pub(crate) fn seal(recipient: &PublicKey, plaintext: &[u8]) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let ephemeral = EphemeralSecret::random(&mut OsRng);
    let point = ephemeral.public_key().to_encoded_point(false);

    let shared = ephemeral.diffie_hellman(recipient);
    let aes_key = derive_aes_key(shared.raw_secret_bytes().as_slice())
        .ok_or_else(|| NoteError::Encryption("HKDF expand failed".to_string()))?;

    let (ciphertext, nonce) = aead::seal(&aes_key, plaintext, point.as_bytes())?;

    let mut output = Vec::with_capacity(POINT_LEN + ciphertext.len());
    output.extend_from_slice(point.as_bytes());
    output.extend_from_slice(&ciphertext);
    Ok((output, nonce))
}

/// Open with the recipient's secret key. Every failure is `Decryption`.
pub(crate) fn open(recipient: &SecretKey, nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < POINT_LEN + TAG_LEN {
        return Err(NoteError::Decryption);
    }

    let (point, ciphertext) = sealed.split_at(POINT_LEN);
    let ephemeral = PublicKey::from_sec1_bytes(point).map_err(|_| NoteError::Decryption)?;

    let shared = p256::ecdh::diffie_hellman(recipient.to_nonzero_scalar(), ephemeral.as_affine());
    let aes_key =
        derive_aes_key(shared.raw_secret_bytes().as_slice()).ok_or(NoteError::Decryption)?;

    aead::open(&aes_key, nonce, ciphertext, point)
}
