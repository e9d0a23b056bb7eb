//! Note encryption service.
//!
//! `NoteCipher` turns a title, a body and the two secret factors into a
//! `NoteRecord`, and back. For asymmetric algorithms a fresh keypair is
//! generated per note; its private half is sealed under the
//! passphrase + color key and handed to the injected vault, so the record
//! can later be opened with the same two factors as a symmetric note.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::cipher::{self, aead, oaep, Algorithm, AsymmetricKeyPair, EncryptedPayload, KeyMaterial};
use crate::crypto::{derive_key_async, validate_passphrase, DerivedKey};
use crate::error::{NoteError, Result};
use crate::note::NoteRecord;
use crate::palette::ColorSequence;
use crate::storage::{PrivateKeyVault, WrappedKey};

/// Encrypts and decrypts notes, storing private keys through a vault.
#[derive(Clone)]
pub struct NoteCipher {
    vault: Arc<dyn PrivateKeyVault>,
}

impl NoteCipher {
    pub fn new(vault: Arc<dyn PrivateKeyVault>) -> Self {
        Self { vault }
    }

    /// Encrypt a new note.
    ///
    /// The title must be non-blank, the body non-empty, the passphrase
    /// non-blank, and `colors` exactly three canonical palette colors.
    /// RSA-OAEP bodies longer than the modulus allows are rejected before
    /// any key is generated.
    ///
    /// # Errors
    ///
    /// - `NoteError::Validation` for any rejected input
    /// - `NoteError::Size` for an oversized RSA-OAEP body
    /// - `NoteError::Encryption` / `NoteError::Derivation` on provider failure
    pub async fn encrypt_note<S: AsRef<str>>(
        &self,
        title: &str,
        plaintext: &str,
        passphrase: &str,
        colors: &[S],
        algorithm: Algorithm,
    ) -> Result<NoteRecord> {
        NoteRecord::validate_title(title)?;
        if plaintext.trim().is_empty() {
            return Err(NoteError::Validation("Content cannot be empty".to_string()));
        }
        validate_passphrase(passphrase)?;
        let colors = ColorSequence::new(colors.iter().map(|c| c.as_ref().to_string()))?;
        colors.ensure_palette()?;
        if algorithm == Algorithm::RsaOaep && plaintext.len() > oaep::MAX_PLAINTEXT_LEN {
            return Err(NoteError::Size {
                len: plaintext.len(),
                max: oaep::MAX_PLAINTEXT_LEN,
            });
        }

        let id = Uuid::now_v7().to_string();
        let derived = derive_key_async(passphrase, colors.as_slice()).await?;

        let payload = match algorithm {
            Algorithm::AesGcm => {
                cipher::encrypt(plaintext.as_bytes(), &KeyMaterial::Symmetric(derived), algorithm)
                    .await?
            }
            Algorithm::RsaOaep | Algorithm::Ecc => {
                let pair = cipher::generate_keypair(algorithm).await?;
                let payload =
                    cipher::encrypt(plaintext.as_bytes(), &pair.public_key(), algorithm).await?;
                self.store_private_key(&id, &pair, &derived)?;
                payload
            }
        };

        tracing::debug!(note_id = %id, algorithm = %algorithm, "encrypted note");
        Ok(NoteRecord::assemble(
            id,
            title.trim(),
            colors,
            &payload,
            Utc::now(),
        ))
    }

    /// Decrypt a note with the supplied passphrase and color order.
    ///
    /// Wrong factors, a tampered record, a missing or foreign private key
    /// and non-UTF-8 output all fail with the same `NoteError::Decryption`.
    pub async fn decrypt_note<S: AsRef<str>>(
        &self,
        record: &NoteRecord,
        passphrase: &str,
        colors: &[S],
    ) -> Result<String> {
        let payload = record.payload()?;
        let derived = derive_key_async(passphrase, colors).await?;
        let key = self.decryption_key(record, derived)?;
        open_body(record, &payload, &key).await
    }

    /// Replace a note's body, keeping its id, title, colors and algorithm.
    ///
    /// The current body must open with the supplied factors first, so a
    /// mistyped passphrase or color order can never re-key a note.
    /// Asymmetric notes keep their existing keypair.
    pub async fn reencrypt_note<S: AsRef<str>>(
        &self,
        record: &NoteRecord,
        plaintext: &str,
        passphrase: &str,
        colors: &[S],
    ) -> Result<NoteRecord> {
        if plaintext.trim().is_empty() {
            return Err(NoteError::Validation("Content cannot be empty".to_string()));
        }
        if record.algorithm == Algorithm::RsaOaep && plaintext.len() > oaep::MAX_PLAINTEXT_LEN {
            return Err(NoteError::Size {
                len: plaintext.len(),
                max: oaep::MAX_PLAINTEXT_LEN,
            });
        }

        let current = record.payload()?;
        let derived = derive_key_async(passphrase, colors).await?;
        let (opening_key, sealing_key) = match record.algorithm {
            Algorithm::AesGcm => {
                let key = KeyMaterial::Symmetric(derived);
                (key.clone(), key)
            }
            Algorithm::RsaOaep | Algorithm::Ecc => {
                let pair = self.load_private_key(record, &derived)?;
                (pair.private_key(), pair.public_key())
            }
        };
        let _current = Zeroizing::new(open_body(record, &current, &opening_key).await?);

        let payload = cipher::encrypt(plaintext.as_bytes(), &sealing_key, record.algorithm).await?;

        tracing::debug!(note_id = %record.id, algorithm = %record.algorithm, "re-encrypted note");
        Ok(record.reencrypted(&payload, Utc::now()))
    }

    fn decryption_key(&self, record: &NoteRecord, derived: DerivedKey) -> Result<KeyMaterial> {
        match record.algorithm {
            Algorithm::AesGcm => Ok(KeyMaterial::Symmetric(derived)),
            Algorithm::RsaOaep | Algorithm::Ecc => {
                Ok(self.load_private_key(record, &derived)?.private_key())
            }
        }
    }

    fn store_private_key(
        &self,
        note_id: &str,
        pair: &AsymmetricKeyPair,
        derived: &DerivedKey,
    ) -> Result<()> {
        let der = pair.to_pkcs8_der()?;
        let (sealed, nonce) = aead::seal(derived.as_bytes(), &der, note_id.as_bytes())?;
        self.vault.put_key(&WrappedKey {
            note_id: note_id.to_string(),
            algorithm: pair.algorithm(),
            nonce: nonce.to_vec(),
            sealed,
            created_at: Utc::now(),
        })
    }

    fn load_private_key(
        &self,
        record: &NoteRecord,
        derived: &DerivedKey,
    ) -> Result<AsymmetricKeyPair> {
        let wrapped = self.vault.get_key(&record.id)?.ok_or_else(|| {
            tracing::warn!(note_id = %record.id, "no private key stored for note");
            NoteError::Decryption
        })?;
        if wrapped.algorithm != record.algorithm {
            return Err(NoteError::Decryption);
        }

        let der = Zeroizing::new(aead::open(
            derived.as_bytes(),
            &wrapped.nonce,
            &wrapped.sealed,
            record.id.as_bytes(),
        )?);
        AsymmetricKeyPair::from_pkcs8_der(record.algorithm, &der)
    }
}

async fn open_body(
    record: &NoteRecord,
    payload: &EncryptedPayload,
    key: &KeyMaterial,
) -> Result<String> {
    let plaintext = cipher::decrypt(payload, key).await.map_err(|e| {
        tracing::warn!(note_id = %record.id, "note decryption rejected");
        e
    })?;
    String::from_utf8(plaintext.to_vec()).map_err(|_| NoteError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, NoteRepository};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const COLORS: [&str; 3] = ["#FF0000", "#00FF00", "#0000FF"];

    fn service() -> (NoteCipher, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (NoteCipher::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_aes_note_roundtrip() {
        let (notes, store) = service();
        let record = notes
            .encrypt_note("Greeting", "Hi", "hello", &COLORS, Algorithm::AesGcm)
            .await
            .unwrap();

        assert_eq!(record.iv.len(), 24);
        assert!(!record.data.is_empty());
        assert!(store.get_key(&record.id).unwrap().is_none());

        let body = notes.decrypt_note(&record, "hello", &COLORS).await.unwrap();
        assert_eq!(body, "Hi");
    }

    #[tokio::test]
    async fn test_reordered_colors_fail() {
        let (notes, _) = service();
        let record = notes
            .encrypt_note("Greeting", "Hi", "hello", &COLORS, Algorithm::AesGcm)
            .await
            .unwrap();

        let result = notes
            .decrypt_note(&record, "hello", &["#0000FF", "#00FF00", "#FF0000"])
            .await;
        assert!(matches!(result, Err(NoteError::Decryption)));
    }

    #[tokio::test]
    async fn test_rsa_note_roundtrip() {
        let (notes, store) = service();
        let record = notes
            .encrypt_note("Pin", "4921", "hello", &COLORS, Algorithm::RsaOaep)
            .await
            .unwrap();

        assert_eq!(record.iv, "");
        assert_eq!(record.algorithm, Algorithm::RsaOaep);
        assert!(store.get_key(&record.id).unwrap().is_some());

        let body = notes.decrypt_note(&record, "hello", &COLORS).await.unwrap();
        assert_eq!(body, "4921");
    }

    #[tokio::test]
    async fn test_ecc_note_roundtrip() {
        let (notes, _) = service();
        let body = "A much longer note body. ".repeat(50);
        let record = notes
            .encrypt_note("Journal", &body, "hello", &COLORS, Algorithm::Ecc)
            .await
            .unwrap();

        assert_eq!(record.iv.len(), 24);
        let opened = notes.decrypt_note(&record, "hello", &COLORS).await.unwrap();
        assert_eq!(opened, body);
    }

    #[tokio::test]
    async fn test_asymmetric_wrong_factors_fail() {
        let (notes, _) = service();
        let record = notes
            .encrypt_note("Pin", "4921", "hello", &COLORS, Algorithm::Ecc)
            .await
            .unwrap();

        let wrong_pass = notes.decrypt_note(&record, "goodbye", &COLORS).await;
        assert!(matches!(wrong_pass, Err(NoteError::Decryption)));

        let wrong_order = notes
            .decrypt_note(&record, "hello", &["#00FF00", "#FF0000", "#0000FF"])
            .await;
        assert!(matches!(wrong_order, Err(NoteError::Decryption)));
    }

    #[tokio::test]
    async fn test_missing_private_key_fails() {
        let (notes, store) = service();
        let record = notes
            .encrypt_note("Pin", "4921", "hello", &COLORS, Algorithm::RsaOaep)
            .await
            .unwrap();
        store.remove_key(&record.id).unwrap();

        let result = notes.decrypt_note(&record, "hello", &COLORS).await;
        assert!(matches!(result, Err(NoteError::Decryption)));
    }

    #[tokio::test]
    async fn test_key_bound_to_note_id() {
        let (notes, store) = service();
        let first = notes
            .encrypt_note("One", "first", "hello", &COLORS, Algorithm::Ecc)
            .await
            .unwrap();
        let second = notes
            .encrypt_note("Two", "second", "hello", &COLORS, Algorithm::Ecc)
            .await
            .unwrap();

        // Move the first note's key under the second note's id.
        let mut moved = store.get_key(&first.id).unwrap().unwrap();
        moved.note_id = second.id.clone();
        store.put_key(&moved).unwrap();

        let result = notes.decrypt_note(&second, "hello", &COLORS).await;
        assert!(matches!(result, Err(NoteError::Decryption)));
    }

    #[tokio::test]
    async fn test_rsa_oversized_body_rejected_before_keygen() {
        let (notes, store) = service();
        let body = "x".repeat(oaep::MAX_PLAINTEXT_LEN + 1);

        let result = notes
            .encrypt_note("Big", &body, "hello", &COLORS, Algorithm::RsaOaep)
            .await;
        assert!(matches!(
            result,
            Err(NoteError::Size { len: 191, max: 190 })
        ));
        assert!(store.list(&Default::default()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_input_validation() {
        let (notes, _) = service();

        let blank_title = notes
            .encrypt_note("  ", "body", "hello", &COLORS, Algorithm::AesGcm)
            .await;
        assert!(matches!(blank_title, Err(NoteError::Validation(_))));

        let empty_body = notes
            .encrypt_note("t", "", "hello", &COLORS, Algorithm::AesGcm)
            .await;
        assert!(matches!(empty_body, Err(NoteError::Validation(_))));

        let blank_body = notes
            .encrypt_note("t", "  \n\t", "hello", &COLORS, Algorithm::AesGcm)
            .await;
        assert!(matches!(blank_body, Err(NoteError::Validation(_))));

        let empty_pass = notes
            .encrypt_note("t", "body", "", &COLORS, Algorithm::AesGcm)
            .await;
        assert!(matches!(empty_pass, Err(NoteError::Validation(_))));

        let two_colors = notes
            .encrypt_note("t", "body", "hello", &["#FF0000", "#00FF00"], Algorithm::AesGcm)
            .await;
        assert!(matches!(two_colors, Err(NoteError::Validation(_))));

        let off_palette = notes
            .encrypt_note("t", "body", "hello", &["#123456", "#00FF00", "#0000FF"], Algorithm::AesGcm)
            .await;
        assert!(matches!(off_palette, Err(NoteError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_colors_allowed() {
        let (notes, _) = service();
        let colors = ["#FF0000", "#FF0000", "#FF0000"];
        let record = notes
            .encrypt_note("t", "body", "hello", &colors, Algorithm::AesGcm)
            .await
            .unwrap();
        assert_eq!(notes.decrypt_note(&record, "hello", &colors).await.unwrap(), "body");
    }

    #[tokio::test]
    async fn test_reencrypt_keeps_identity_and_keypair() {
        let (notes, store) = service();
        let record = notes
            .encrypt_note("Plan", "v1", "hello", &COLORS, Algorithm::Ecc)
            .await
            .unwrap();
        let key_before = store.get_key(&record.id).unwrap().unwrap();

        let updated = notes
            .reencrypt_note(&record, "v2", "hello", &COLORS)
            .await.unwrap();
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.created_at, record.created_at);
        assert_ne!(updated.data, record.data);
        assert_eq!(store.get_key(&record.id).unwrap().unwrap(), key_before);

        assert_eq!(notes.decrypt_note(&updated, "hello", &COLORS).await.unwrap(), "v2");
    }

    #[tokio::test]
    async fn test_reencrypt_requires_correct_passphrase() {
        let (notes, _) = service();
        let record = notes
            .encrypt_note("Plan", "v1", "hello", &COLORS, Algorithm::AesGcm)
            .await
            .unwrap();

        let result = notes.reencrypt_note(&record, "v2", "wrong", &COLORS).await;
        assert!(matches!(result, Err(NoteError::Decryption)));

        let reordered = ["#0000FF", "#00FF00", "#FF0000"];
        let result = notes.reencrypt_note(&record, "v2", "hello", &reordered).await;
        assert!(matches!(result, Err(NoteError::Decryption)));
    }

    #[tokio::test]
    async fn test_reencrypt_rejects_blank_body() {
        let (notes, _) = service();
        let record = notes
            .encrypt_note("Plan", "v1", "hello", &COLORS, Algorithm::AesGcm)
            .await
            .unwrap();

        let result = notes.reencrypt_note(&record, " \n ", "hello", &COLORS).await;
        assert!(matches!(result, Err(NoteError::Validation(_))));
    }

    /// Counts private key lookups to show how often a note is unlocked.
    struct CountingVault {
        inner: MemoryStore,
        lookups: AtomicUsize,
    }

    impl PrivateKeyVault for CountingVault {
        fn put_key(&self, key: &WrappedKey) -> Result<()> {
            self.inner.put_key(key)
        }

        fn get_key(&self, note_id: &str) -> Result<Option<WrappedKey>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_key(note_id)
        }

        fn remove_key(&self, note_id: &str) -> Result<bool> {
            self.inner.remove_key(note_id)
        }
    }

    #[tokio::test]
    async fn test_reencrypt_unlocks_once() {
        let vault = Arc::new(CountingVault {
            inner: MemoryStore::new(),
            lookups: AtomicUsize::new(0),
        });
        let notes = NoteCipher::new(vault.clone());
        let record = notes
            .encrypt_note("Plan", "v1", "hello", &COLORS, Algorithm::Ecc)
            .await
            .unwrap();
        assert_eq!(vault.lookups.load(Ordering::SeqCst), 0);

        let updated = notes
            .reencrypt_note(&record, "v2", "hello", &COLORS)
            .await
            .unwrap();
        assert_eq!(vault.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(notes.decrypt_note(&updated, "hello", &COLORS).await.unwrap(), "v2");
    }

    #[tokio::test]
    async fn test_note_ids_unique() {
        let (notes, _) = service();
        let a = notes
            .encrypt_note("a", "same", "hello", &COLORS, Algorithm::AesGcm)
            .await
            .unwrap();
        let b = notes
            .encrypt_note("a", "same", "hello", &COLORS, Algorithm::AesGcm)
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.iv, b.iv);
    }
}
