//! Storage trait definitions.
//!
//! The note service and the CLI only talk to these traits, so a backend can
//! be swapped (in-memory for tests, SQLite on disk) without touching them.
//! Records and keys arrive here already encrypted; no backend ever sees
//! plaintext or a passphrase.

use super::types::{NoteFilter, WrappedKey};
use crate::error::Result;
use crate::note::NoteRecord;

/// Persistence for encrypted note records.
///
/// Implementations guard their state internally and take `&self`, so one
/// instance can be shared behind an `Arc`.
pub trait NoteRepository: Send + Sync {
    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Validation` if a record with the same id exists.
    fn create(&self, record: &NoteRecord) -> Result<()>;

    /// Replace an existing record.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::NotFound` if no record has this id.
    fn update(&self, record: &NoteRecord) -> Result<()>;

    /// Get a record by id.
    ///
    /// Returns `Ok(None)` if not found.
    fn get(&self, id: &str) -> Result<Option<NoteRecord>>;

    /// List records matching the filter, newest first.
    fn list(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>>;

    /// Delete a record and any private key stored for it.
    ///
    /// Returns whether a record was removed.
    fn delete(&self, id: &str) -> Result<bool>;
}

/// Storage for sealed asymmetric private keys, keyed by note id.
pub trait PrivateKeyVault: Send + Sync {
    /// Store a key, replacing any previous key for the same note.
    fn put_key(&self, key: &WrappedKey) -> Result<()>;

    /// Fetch the key for a note.
    fn get_key(&self, note_id: &str) -> Result<Option<WrappedKey>>;

    /// Remove the key for a note. Returns whether one existed.
    fn remove_key(&self, note_id: &str) -> Result<bool>;
}
