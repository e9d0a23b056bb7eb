//! The persisted note record.
//!
//! A record holds only ciphertext and the information needed to reopen it:
//! the nonce, the algorithm tag and the color sequence. The passphrase is
//! never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cipher::{Algorithm, EncryptedPayload};
use crate::codec;
use crate::error::{NoteError, Result};
use crate::palette::ColorSequence;

/// A stored, encrypted note.
///
/// Serializes to camelCase JSON. Records written before algorithm
/// selection existed carry no `algorithm` field and read as AES-GCM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    /// Hex-encoded ciphertext.
    pub data: String,
    /// Hex-encoded nonce, or `""` for algorithms without one.
    pub iv: String,
    pub color_sequence: ColorSequence,
    #[serde(default)]
    pub algorithm: Algorithm,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteRecord {
    /// Build a new record from an encryption result.
    pub fn assemble(
        id: impl Into<String>,
        title: impl Into<String>,
        colors: ColorSequence,
        payload: &EncryptedPayload,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            data: codec::encode(payload.ciphertext()),
            iv: codec::encode_nonce(payload.nonce()),
            color_sequence: colors,
            algorithm: payload.algorithm(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The same note carrying a new payload.
    ///
    /// Identity, title, colors and creation time are kept.
    pub fn reencrypted(&self, payload: &EncryptedPayload, now: DateTime<Utc>) -> Self {
        Self {
            data: codec::encode(payload.ciphertext()),
            iv: codec::encode_nonce(payload.nonce()),
            algorithm: payload.algorithm(),
            updated_at: now,
            ..self.clone()
        }
    }

    /// Decode the hex fields back into a payload.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Encoding` if either field is not valid hex, or if
    /// the presence of an `iv` disagrees with the algorithm.
    pub fn payload(&self) -> Result<EncryptedPayload> {
        let ciphertext = codec::decode(&self.data)?;
        let nonce = codec::decode_nonce(&self.iv)?;
        EncryptedPayload::new(self.algorithm, ciphertext, nonce)
    }

    /// Check the title the way the write page does: non-blank after trimming.
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(NoteError::Validation("Title cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Case-insensitive title search, as used by the note list.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

impl PartialEq for NoteRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NoteRecord {}
