//! Algorithm-selectable authenticated encryption.
//!
//! Three algorithms are supported, selected by a closed [`Algorithm`] enum:
//! - **AES-GCM**: key derived from passphrase + colors, 96-bit random nonce
//! - **RSA-OAEP**: 2048-bit RSA, OAEP with SHA-256, no nonce
//! - **ECC**: ephemeral P-256 ECDH + HKDF-SHA256 + AES-GCM
//!
//! The public entry points are async and run the actual cryptography on the
//! blocking pool. Decryption has exactly one failure signal,
//! [`NoteError::Decryption`], whatever the cause.

pub mod aead;
pub mod ecc;
pub mod keypair;
pub mod oaep;

use std::fmt;
use std::str::FromStr;

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::DerivedKey;
use crate::error::{NoteError, Result};

pub use keypair::AsymmetricKeyPair;

/// Supported note encryption algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "AES-GCM")]
    AesGcm,
    #[serde(rename = "RSA-OAEP")]
    RsaOaep,
    #[serde(rename = "ECC")]
    Ecc,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 3] = [Algorithm::AesGcm, Algorithm::RsaOaep, Algorithm::Ecc];

    /// Stored tag, e.g. `"AES-GCM"`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AesGcm => "AES-GCM",
            Self::RsaOaep => "RSA-OAEP",
            Self::Ecc => "ECC",
        }
    }

    /// Whether payloads for this algorithm carry a nonce.
    pub fn uses_nonce(&self) -> bool {
        match self {
            Self::AesGcm | Self::Ecc => true,
            Self::RsaOaep => false,
        }
    }

    /// Whether this algorithm needs a generated keypair.
    pub fn is_asymmetric(&self) -> bool {
        match self {
            Self::AesGcm => false,
            Self::RsaOaep | Self::Ecc => true,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = NoteError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "aes-gcm" | "aes" => Ok(Self::AesGcm),
            "rsa-oaep" | "rsa" => Ok(Self::RsaOaep),
            "ecc" | "ecdh" => Ok(Self::Ecc),
            other => Err(NoteError::Validation(format!(
                "Unknown algorithm: {} (expected aes-gcm, rsa-oaep or ecc)",
                other
            ))),
        }
    }
}

/// Output of [`encrypt`]: raw ciphertext plus nonce when the algorithm has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    algorithm: Algorithm,
    ciphertext: Vec<u8>,
    nonce: Option<Vec<u8>>,
}

impl EncryptedPayload {
    /// Assemble a payload, enforcing that a nonce is present exactly when
    /// the algorithm uses one.
    pub fn new(algorithm: Algorithm, ciphertext: Vec<u8>, nonce: Option<Vec<u8>>) -> Result<Self> {
        if algorithm.uses_nonce() != nonce.is_some() {
            return Err(NoteError::Encoding(format!(
                "{} payload {} a nonce",
                algorithm,
                if algorithm.uses_nonce() {
                    "requires"
                } else {
                    "must not carry"
                }
            )));
        }
        Ok(Self {
            algorithm,
            ciphertext,
            nonce,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn nonce(&self) -> Option<&[u8]> {
        self.nonce.as_deref()
    }
}

/// Key material for one algorithm and one direction.
#[derive(Clone)]
pub enum KeyMaterial {
    Symmetric(DerivedKey),
    RsaPublic(RsaPublicKey),
    RsaPrivate(RsaPrivateKey),
    EcPublic(p256::PublicKey),
    EcSecret(p256::SecretKey),
}

impl KeyMaterial {
    /// The algorithm this key belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Symmetric(_) => Algorithm::AesGcm,
            Self::RsaPublic(_) | Self::RsaPrivate(_) => Algorithm::RsaOaep,
            Self::EcPublic(_) | Self::EcSecret(_) => Algorithm::Ecc,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Symmetric(_) => "Symmetric",
            Self::RsaPublic(_) => "RsaPublic",
            Self::RsaPrivate(_) => "RsaPrivate",
            Self::EcPublic(_) => "EcPublic",
            Self::EcSecret(_) => "EcSecret",
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial::{}([REDACTED])", self.kind())
    }
}

impl From<DerivedKey> for KeyMaterial {
    fn from(key: DerivedKey) -> Self {
        KeyMaterial::Symmetric(key)
    }
}

/// Encrypt `plaintext` under `key` with `algorithm`.
///
/// The key must be the encryption key for `algorithm`: a derived key for
/// AES-GCM, a public key for RSA-OAEP and ECC.
///
/// # Errors
///
/// - `NoteError::Encryption` on a key/algorithm mismatch or provider failure
/// - `NoteError::Size` when RSA-OAEP input exceeds the modulus bound
pub async fn encrypt(
    plaintext: &[u8],
    key: &KeyMaterial,
    algorithm: Algorithm,
) -> Result<EncryptedPayload> {
    let plaintext = Zeroizing::new(plaintext.to_vec());
    let key = key.clone();
    tokio::task::spawn_blocking(move || encrypt_blocking(&plaintext, &key, algorithm))
        .await
        .map_err(|e| NoteError::Encryption(format!("Encryption task failed: {}", e)))?
}

/// Decrypt a payload with `key`.
///
/// Any failure, including an algorithm tag that does not match the key, is
/// reported as `NoteError::Decryption`. No partial plaintext is returned.
pub async fn decrypt(payload: &EncryptedPayload, key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
    let payload = payload.clone();
    let key = key.clone();
    tokio::task::spawn_blocking(move || decrypt_blocking(&payload, &key))
        .await
        .map_err(|_| NoteError::Decryption)?
}

/// Generate a fresh keypair for an asymmetric algorithm.
pub async fn generate_keypair(algorithm: Algorithm) -> Result<AsymmetricKeyPair> {
    match algorithm {
        Algorithm::AesGcm => Err(NoteError::Validation(
            "AES-GCM uses a derived key, not a keypair".to_string(),
        )),
        Algorithm::RsaOaep => {
            tracing::debug!(bits = oaep::RSA_BITS, "generating RSA keypair");
            let private = tokio::task::spawn_blocking(oaep::generate)
                .await
                .map_err(|e| NoteError::Encryption(format!("Key generation task failed: {}", e)))??;
            Ok(AsymmetricKeyPair::Rsa(private))
        }
        Algorithm::Ecc => {
            tracing::debug!("generating P-256 keypair");
            Ok(AsymmetricKeyPair::Ec(ecc::generate()))
        }
    }
}

fn key_mismatch(key: &KeyMaterial, algorithm: Algorithm) -> NoteError {
    NoteError::Encryption(format!(
        "{} key cannot encrypt {} payloads",
        key.kind(),
        algorithm
    ))
}

pub(crate) fn encrypt_blocking(
    plaintext: &[u8],
    key: &KeyMaterial,
    algorithm: Algorithm,
) -> Result<EncryptedPayload> {
    let payload = match algorithm {
        Algorithm::AesGcm => {
            let KeyMaterial::Symmetric(derived) = key else {
                return Err(key_mismatch(key, algorithm));
            };
            let (ciphertext, nonce) = aead::seal(derived.as_bytes(), plaintext, &[])?;
            EncryptedPayload::new(algorithm, ciphertext, Some(nonce.to_vec()))?
        }
        Algorithm::RsaOaep => {
            let KeyMaterial::RsaPublic(public) = key else {
                return Err(key_mismatch(key, algorithm));
            };
            let ciphertext = oaep::encrypt(public, plaintext)?;
            EncryptedPayload::new(algorithm, ciphertext, None)?
        }
        Algorithm::Ecc => {
            let KeyMaterial::EcPublic(public) = key else {
                return Err(key_mismatch(key, algorithm));
            };
            let (sealed, nonce) = ecc::seal(public, plaintext)?;
            EncryptedPayload::new(algorithm, sealed, Some(nonce.to_vec()))?
        }
    };

    tracing::debug!(
        algorithm = %algorithm,
        ciphertext_len = payload.ciphertext.len(),
        "encrypted payload"
    );
    Ok(payload)
}

pub(crate) fn decrypt_blocking(
    payload: &EncryptedPayload,
    key: &KeyMaterial,
) -> Result<Zeroizing<Vec<u8>>> {
    if payload.algorithm != key.algorithm() {
        return Err(NoteError::Decryption);
    }

    let plaintext = match (payload.algorithm, key) {
        (Algorithm::AesGcm, KeyMaterial::Symmetric(derived)) => {
            let nonce = payload.nonce().ok_or(NoteError::Decryption)?;
            aead::open(derived.as_bytes(), nonce, &payload.ciphertext, &[])?
        }
        (Algorithm::RsaOaep, KeyMaterial::RsaPrivate(private)) => {
            oaep::decrypt(private, &payload.ciphertext)?
        }
        (Algorithm::Ecc, KeyMaterial::EcSecret(secret)) => {
            let nonce = payload.nonce().ok_or(NoteError::Decryption)?;
            ecc::open(secret, nonce, &payload.ciphertext)?
        }
        // Public keys cannot decrypt.
        _ => return Err(NoteError::Decryption),
    };

    Ok(Zeroizing::new(plaintext))
}
