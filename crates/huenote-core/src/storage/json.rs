//! JSON export and import.
//!
//! The archive is an object with an `encryptedNotes` array of camelCase
//! records. Sealed private keys for asymmetric notes travel alongside in
//! `wrappedKeys`, hex encoded. A bare array of records is also accepted on
//! import.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::WrappedKey;
use crate::cipher::Algorithm;
use crate::codec;
use crate::error::{NoteError, Result};
use crate::note::NoteRecord;

/// Notes and their sealed keys, as read from or written to an archive.
#[derive(Debug, Clone, Default)]
pub struct NoteArchive {
    pub notes: Vec<NoteRecord>,
    pub keys: Vec<WrappedKey>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WrappedKeyJson {
    note_id: String,
    algorithm: Algorithm,
    nonce: String,
    sealed: String,
    created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArchiveJson {
    encrypted_notes: Vec<NoteRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    wrapped_keys: Vec<WrappedKeyJson>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArchiveInput {
    Archive(ArchiveJson),
    Records(Vec<NoteRecord>),
}

impl From<&WrappedKey> for WrappedKeyJson {
    fn from(key: &WrappedKey) -> Self {
        Self {
            note_id: key.note_id.clone(),
            algorithm: key.algorithm,
            nonce: codec::encode(&key.nonce),
            sealed: codec::encode(&key.sealed),
            created_at: key.created_at,
        }
    }
}

impl TryFrom<WrappedKeyJson> for WrappedKey {
    type Error = NoteError;

    fn try_from(json: WrappedKeyJson) -> Result<Self> {
        Ok(Self {
            nonce: codec::decode(&json.nonce)?,
            sealed: codec::decode(&json.sealed)?,
            note_id: json.note_id,
            algorithm: json.algorithm,
            created_at: json.created_at,
        })
    }
}

/// Write notes and keys to `path`, replacing it atomically.
pub fn export_json(path: &Path, notes: &[NoteRecord], keys: &[WrappedKey]) -> Result<()> {
    let archive = ArchiveJson {
        encrypted_notes: notes.to_vec(),
        wrapped_keys: keys.iter().map(WrappedKeyJson::from).collect(),
    };
    let mut bytes = serde_json::to_vec_pretty(&archive)?;
    bytes.push(b'\n');

    crate::fs::write_atomic(path, &bytes)
        .map_err(|e| NoteError::Storage(format!("Export write failed: {}", e)))?;
    tracing::debug!(notes = notes.len(), keys = keys.len(), "exported archive");
    Ok(())
}

/// Read an archive from `path`.
///
/// Every record's hex fields are checked before anything is returned.
pub fn import_json(path: &Path) -> Result<NoteArchive> {
    let bytes = fs::read(path)?;
    let input: ArchiveInput = serde_json::from_slice(&bytes)?;

    let (notes, keys) = match input {
        ArchiveInput::Archive(archive) => (archive.encrypted_notes, archive.wrapped_keys),
        ArchiveInput::Records(notes) => (notes, Vec::new()),
    };

    for note in &notes {
        note.payload().map_err(|e| {
            NoteError::Validation(format!("Note {} in archive is malformed: {}", note.id, e))
        })?;
    }
    let keys = keys
        .into_iter()
        .map(WrappedKey::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(NoteArchive { notes, keys })
}
