//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::traits::{NoteRepository, PrivateKeyVault};
use super::types::{NoteFilter, WrappedKey};
use crate::error::{NoteError, Result};
use crate::note::NoteRecord;

/// Both storage traits over process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<HashMap<String, NoteRecord>>,
    keys: Mutex<HashMap<String, WrappedKey>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_notes(&self) -> Result<MutexGuard<'_, HashMap<String, NoteRecord>>> {
        self.notes
            .lock()
            .map_err(|_| NoteError::Storage("Note map poisoned".to_string()))
    }

    fn lock_keys(&self) -> Result<MutexGuard<'_, HashMap<String, WrappedKey>>> {
        self.keys
            .lock()
            .map_err(|_| NoteError::Storage("Key map poisoned".to_string()))
    }
}

impl NoteRepository for MemoryStore {
    fn create(&self, record: &NoteRecord) -> Result<()> {
        let mut notes = self.lock_notes()?;
        if notes.contains_key(&record.id) {
            return Err(NoteError::Validation(format!(
                "Note already exists: {}",
                record.id
            )));
        }
        notes.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn update(&self, record: &NoteRecord) -> Result<()> {
        let mut notes = self.lock_notes()?;
        match notes.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(NoteError::NotFound(format!("Note {}", record.id))),
        }
    }

    fn get(&self, id: &str) -> Result<Option<NoteRecord>> {
        Ok(self.lock_notes()?.get(id).cloned())
    }

    fn list(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>> {
        let notes = self.lock_notes()?;
        Ok(filter.apply(notes.values().cloned()))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut notes = self.lock_notes()?;
        let mut keys = self.lock_keys()?;
        let removed = notes.remove(id).is_some();
        keys.remove(id);
        Ok(removed)
    }
}

impl PrivateKeyVault for MemoryStore {
    fn put_key(&self, key: &WrappedKey) -> Result<()> {
        self.lock_keys()?.insert(key.note_id.clone(), key.clone());
        Ok(())
    }

    fn get_key(&self, note_id: &str) -> Result<Option<WrappedKey>> {
        Ok(self.lock_keys()?.get(note_id).cloned())
    }

    fn remove_key(&self, note_id: &str) -> Result<bool> {
        Ok(self.lock_keys()?.remove(note_id).is_some())
    }
}
