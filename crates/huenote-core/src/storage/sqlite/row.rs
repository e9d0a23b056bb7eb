//! Row types for database queries.

use chrono::{DateTime, Utc};

use crate::cipher::Algorithm;
use crate::error::{NoteError, Result};
use crate::note::NoteRecord;
use crate::palette::ColorSequence;
use crate::storage::types::WrappedKey;

pub(super) const NOTE_COLUMNS: &str =
    "id, title, data, iv, color_sequence, algorithm, created_at, updated_at";

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
pub struct NoteRow {
    pub id: String,
    pub title: String,
    pub data: String,
    pub iv: String,
    pub color_sequence: String,
    pub algorithm: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteRow {
    /// Read a row selected with [`NOTE_COLUMNS`].
    pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            data: row.get(2)?,
            iv: row.get(3)?,
            color_sequence: row.get(4)?,
            algorithm: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| NoteError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

fn parse_algorithm(value: &str) -> Result<Algorithm> {
    value
        .parse()
        .map_err(|_| NoteError::Storage(format!("Invalid algorithm tag: {}", value)))
}

impl TryFrom<NoteRow> for NoteRecord {
    type Error = NoteError;

    fn try_from(row: NoteRow) -> Result<Self> {
        let colors: Vec<String> = serde_json::from_str(&row.color_sequence)
            .map_err(|e| NoteError::Storage(format!("Invalid color sequence JSON: {}", e)))?;
        let color_sequence = ColorSequence::try_from(colors)
            .map_err(|e| NoteError::Storage(format!("Invalid color sequence: {}", e)))?;

        Ok(NoteRecord {
            algorithm: parse_algorithm(&row.algorithm)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            id: row.id,
            title: row.title,
            data: row.data,
            iv: row.iv,
            color_sequence,
        })
    }
}

/// Raw row data from the wrapped_keys table.
#[derive(Debug)]
pub struct WrappedKeyRow {
    pub note_id: String,
    pub algorithm: String,
    pub nonce: Vec<u8>,
    pub sealed: Vec<u8>,
    pub created_at: String,
}

impl TryFrom<WrappedKeyRow> for WrappedKey {
    type Error = NoteError;

    fn try_from(row: WrappedKeyRow) -> Result<Self> {
        Ok(WrappedKey {
            algorithm: parse_algorithm(&row.algorithm)?,
            created_at: parse_timestamp(&row.created_at)?,
            note_id: row.note_id,
            nonce: row.nonce,
            sealed: row.sealed,
        })
    }
}
