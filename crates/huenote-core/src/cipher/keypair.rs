//! Asymmetric keypairs and their PKCS#8 form.
//!
//! Private keys only leave this module as zeroizing PKCS#8 DER, which the
//! note service seals before handing it to a vault.

use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use super::{Algorithm, KeyMaterial};
use crate::error::{NoteError, Result};

/// A freshly generated or restored asymmetric keypair.
#[derive(Clone)]
pub enum AsymmetricKeyPair {
    Rsa(RsaPrivateKey),
    Ec(p256::SecretKey),
}

impl AsymmetricKeyPair {
    /// The algorithm this keypair serves.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Rsa(_) => Algorithm::RsaOaep,
            Self::Ec(_) => Algorithm::Ecc,
        }
    }

    /// Encryption half.
    pub fn public_key(&self) -> KeyMaterial {
        match self {
            Self::Rsa(private) => KeyMaterial::RsaPublic(RsaPublicKey::from(private)),
            Self::Ec(secret) => KeyMaterial::EcPublic(secret.public_key()),
        }
    }

    /// Decryption half.
    pub fn private_key(&self) -> KeyMaterial {
        match self {
            Self::Rsa(private) => KeyMaterial::RsaPrivate(private.clone()),
            Self::Ec(secret) => KeyMaterial::EcSecret(secret.clone()),
        }
    }

    /// Serialize the private key as PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let document = match self {
            Self::Rsa(private) => private.to_pkcs8_der(),
            Self::Ec(secret) => secret.to_pkcs8_der(),
        }
        .map_err(|e| NoteError::Encryption(format!("PKCS#8 encoding failed: {}", e)))?;
        Ok(Zeroizing::new(document.as_bytes().to_vec()))
    }

    /// Restore a keypair from PKCS#8 DER.
    ///
    /// This is only reached after the DER has been authenticated, so a
    /// parse failure is reported as the generic decryption failure.
    pub fn from_pkcs8_der(algorithm: Algorithm, der: &[u8]) -> Result<Self> {
        match algorithm {
            Algorithm::AesGcm => Err(NoteError::Decryption),
            Algorithm::RsaOaep => RsaPrivateKey::from_pkcs8_der(der)
                .map(Self::Rsa)
                .map_err(|_| NoteError::Decryption),
            Algorithm::Ecc => p256::SecretKey::from_pkcs8_der(der)
                .map(Self::Ec)
                .map_err(|_| NoteError::Decryption),
        }
    }
}

impl std::fmt::Debug for AsymmetricKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsymmetricKeyPair")
            .field("algorithm", &self.algorithm())
            .field("private", &"[REDACTED]")
            .finish()
    }
}
