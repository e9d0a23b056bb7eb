//! SQLite storage backend.
//!
//! Records are already encrypted when they reach this layer, so the database
//! file itself is plain SQLite. A `meta` table carries the format version;
//! `notes` holds the records and `wrapped_keys` the sealed private keys of
//! asymmetric notes.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{NoteError, Result};
use crate::note::NoteRecord;
use crate::storage::traits::{NoteRepository, PrivateKeyVault};
use crate::storage::types::{NoteFilter, WrappedKey};

use row::{NoteRow, WrappedKeyRow, NOTE_COLUMNS};

/// Current on-disk schema version.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        data TEXT NOT NULL,
        iv TEXT NOT NULL,
        color_sequence TEXT NOT NULL,
        algorithm TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS notes_created_at ON notes (created_at);
    CREATE TABLE IF NOT EXISTS wrapped_keys (
        note_id TEXT PRIMARY KEY,
        algorithm TEXT NOT NULL,
        nonce BLOB NOT NULL,
        sealed BLOB NOT NULL,
        created_at TEXT NOT NULL
    );
"#;

/// Counts gathered by [`SqliteStore::check_integrity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityReport {
    pub notes: usize,
    pub wrapped_keys: usize,
}

/// Notes and wrapped keys in a single SQLite file.
pub struct SqliteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store at `path`, creating the file and schema if absent.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Storage` if the file was written by an
    /// incompatible format version.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self::init(conn, path.to_path_buf())?;
        tracing::debug!(path = %path.display(), "opened note store");
        Ok(store)
    }

    /// Open a throwaway store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match version.as_deref() {
            None => {
                conn.execute(
                    "INSERT INTO meta (key, value) VALUES ('format_version', ?)",
                    [FORMAT_VERSION],
                )?;
                conn.execute(
                    "INSERT INTO meta (key, value) VALUES ('created_at', ?)",
                    [timestamp(&Utc::now())],
                )?;
            }
            Some(FORMAT_VERSION) => {}
            Some(other) => {
                return Err(NoteError::Storage(format!(
                    "Unsupported store format version: {} (expected {})",
                    other, FORMAT_VERSION
                )));
            }
        }

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Where this store lives on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NoteError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Verify the database and every stored record.
    ///
    /// Checks SQLite's own page integrity, the format version, that every
    /// note decodes to a consistent payload, and that asymmetric notes and
    /// wrapped keys pair up one-to-one.
    pub fn check_integrity(&self) -> Result<IntegrityReport> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(NoteError::Storage(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if version.as_deref() != Some(FORMAT_VERSION) {
            return Err(NoteError::Storage(
                "Metadata table missing format_version".to_string(),
            ));
        }

        let mut stmt = conn.prepare(&format!("SELECT {} FROM notes", NOTE_COLUMNS))?;
        let rows = stmt.query_map([], NoteRow::from_row)?;
        let mut notes = 0;
        for row in rows {
            let record: NoteRecord = row?.try_into()?;
            record.payload().map_err(|e| {
                NoteError::Storage(format!("Note {} is malformed: {}", record.id, e))
            })?;
            notes += 1;
        }

        let missing_keys: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notes n LEFT JOIN wrapped_keys k ON n.id = k.note_id \
             WHERE n.algorithm != 'AES-GCM' AND k.note_id IS NULL",
            [],
            |row| row.get(0),
        )?;
        if missing_keys > 0 {
            return Err(NoteError::Storage(format!(
                "{} asymmetric note(s) have no stored private key",
                missing_keys
            )));
        }

        let orphaned_keys: i64 = conn.query_row(
            "SELECT COUNT(*) FROM wrapped_keys k LEFT JOIN notes n ON k.note_id = n.id \
             WHERE n.id IS NULL",
            [],
            |row| row.get(0),
        )?;
        if orphaned_keys > 0 {
            return Err(NoteError::Storage(format!(
                "{} wrapped key(s) belong to no note",
                orphaned_keys
            )));
        }

        let wrapped_keys: i64 =
            conn.query_row("SELECT COUNT(*) FROM wrapped_keys", [], |row| row.get(0))?;

        Ok(IntegrityReport {
            notes,
            wrapped_keys: usize::try_from(wrapped_keys).unwrap_or_default(),
        })
    }
}

/// Fixed-width UTC timestamps so text order matches time order.
fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn color_json(record: &NoteRecord) -> Result<String> {
    Ok(serde_json::to_string(record.color_sequence.as_slice())?)
}

impl NoteRepository for SqliteStore {
    fn create(&self, record: &NoteRecord) -> Result<()> {
        let conn = self.lock_conn()?;
        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO notes
                (id, title, data, iv, color_sequence, algorithm, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.id,
                record.title,
                record.data,
                record.iv,
                color_json(record)?,
                record.algorithm.tag(),
                timestamp(&record.created_at),
                timestamp(&record.updated_at),
            ],
        )?;
        if inserted == 0 {
            return Err(NoteError::Validation(format!(
                "Note already exists: {}",
                record.id
            )));
        }
        Ok(())
    }

    fn update(&self, record: &NoteRecord) -> Result<()> {
        let conn = self.lock_conn()?;
        let updated = conn.execute(
            r#"
            UPDATE notes
            SET title = ?, data = ?, iv = ?, color_sequence = ?, algorithm = ?,
                created_at = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                record.title,
                record.data,
                record.iv,
                color_json(record)?,
                record.algorithm.tag(),
                timestamp(&record.created_at),
                timestamp(&record.updated_at),
                record.id,
            ],
        )?;
        if updated == 0 {
            return Err(NoteError::NotFound(format!("Note {}", record.id)));
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<NoteRecord>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS),
                [id],
                NoteRow::from_row,
            )
            .optional()?;
        row.map(NoteRecord::try_from).transpose()
    }

    fn list(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>> {
        let conn = self.lock_conn()?;

        let mut query = format!("SELECT {} FROM notes", NOTE_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(algorithm) = filter.algorithm {
            query.push_str(" WHERE algorithm = ?");
            params.push(Box::new(algorithm.tag()));
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), NoteRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(NoteRecord::try_from(row?)?);
        }

        // Title search is Unicode case-insensitive, which SQLite's LIKE is not.
        Ok(filter.apply(records))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM notes WHERE id = ?", [id])?;
        tx.execute("DELETE FROM wrapped_keys WHERE note_id = ?", [id])?;
        tx.commit()?;
        Ok(removed > 0)
    }
}

impl PrivateKeyVault for SqliteStore {
    fn put_key(&self, key: &WrappedKey) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO wrapped_keys (note_id, algorithm, nonce, sealed, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                key.note_id,
                key.algorithm.tag(),
                key.nonce,
                key.sealed,
                timestamp(&key.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_key(&self, note_id: &str) -> Result<Option<WrappedKey>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                "SELECT note_id, algorithm, nonce, sealed, created_at FROM wrapped_keys WHERE note_id = ?",
                [note_id],
                |row| {
                    Ok(WrappedKeyRow {
                        note_id: row.get(0)?,
                        algorithm: row.get(1)?,
                        nonce: row.get(2)?,
                        sealed: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        row.map(WrappedKey::try_from).transpose()
    }

    fn remove_key(&self, note_id: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM wrapped_keys WHERE note_id = ?", [note_id])?;
        Ok(removed > 0)
    }
}
