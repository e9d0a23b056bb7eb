use std::collections::HashMap;
use std::path::Path;

use huenote_core::storage::{import_json, WrappedKey};
use huenote_core::{NoteRecord, NoteRepository, PrivateKeyVault};

use crate::app::AppContext;
use crate::cli::ImportArgs;

/// Add archived notes whose ids are not already in the store.
pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let archive = import_json(Path::new(&args.source))?;

    let mut keys: HashMap<String, _> = archive
        .keys
        .into_iter()
        .map(|key| (key.note_id.clone(), key))
        .collect();

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for note in &archive.notes {
        if store.get(&note.id)?.is_some() {
            tracing::debug!(note_id = %note.id, "skipping existing note");
            skipped += 1;
            continue;
        }
        restore_note(store.as_ref(), note, keys.remove(&note.id).as_ref())?;
        imported += 1;
    }

    if !ctx.quiet() {
        println!("Imported {} notes ({} skipped)", imported, skipped);
    }
    Ok(())
}

/// Write a note and its key; the key is removed again if the note insert fails.
fn restore_note<S>(store: &S, note: &NoteRecord, key: Option<&WrappedKey>) -> anyhow::Result<()>
where
    S: NoteRepository + PrivateKeyVault + ?Sized,
{
    if let Some(key) = key {
        store.put_key(key)?;
    }
    if let Err(err) = store.create(note) {
        if key.is_some() {
            if let Err(cleanup) = store.remove_key(&note.id) {
                tracing::warn!(note_id = %note.id, error = %cleanup, "failed to remove orphaned key");
            }
        }
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use huenote_core::storage::{MemoryStore, NoteFilter};
    use huenote_core::{Algorithm, ColorSequence, EncryptedPayload, NoteError, PaletteColor};

    /// Accepts keys but refuses every note insert.
    struct FullStore {
        inner: MemoryStore,
    }

    impl NoteRepository for FullStore {
        fn create(&self, _record: &NoteRecord) -> huenote_core::Result<()> {
            Err(NoteError::Storage("database or disk is full".to_string()))
        }

        fn update(&self, record: &NoteRecord) -> huenote_core::Result<()> {
            self.inner.update(record)
        }

        fn get(&self, id: &str) -> huenote_core::Result<Option<NoteRecord>> {
            self.inner.get(id)
        }

        fn list(&self, filter: &NoteFilter) -> huenote_core::Result<Vec<NoteRecord>> {
            self.inner.list(filter)
        }

        fn delete(&self, id: &str) -> huenote_core::Result<bool> {
            self.inner.delete(id)
        }
    }

    impl PrivateKeyVault for FullStore {
        fn put_key(&self, key: &WrappedKey) -> huenote_core::Result<()> {
            self.inner.put_key(key)
        }

        fn get_key(&self, note_id: &str) -> huenote_core::Result<Option<WrappedKey>> {
            self.inner.get_key(note_id)
        }

        fn remove_key(&self, note_id: &str) -> huenote_core::Result<bool> {
            self.inner.remove_key(note_id)
        }
    }

    fn ecc_note(id: &str) -> (NoteRecord, WrappedKey) {
        let payload =
            EncryptedPayload::new(Algorithm::Ecc, vec![7; 90], Some(vec![0; 12])).unwrap();
        let colors = ColorSequence::from_palette([
            PaletteColor::Red,
            PaletteColor::Lime,
            PaletteColor::Blue,
        ]);
        let note = NoteRecord::assemble(id, "Curve", colors, &payload, Utc::now());
        let key = WrappedKey {
            note_id: id.to_string(),
            algorithm: Algorithm::Ecc,
            nonce: vec![0; 12],
            sealed: vec![9; 64],
            created_at: Utc::now(),
        };
        (note, key)
    }

    #[test]
    fn test_restore_note_writes_note_and_key() {
        let store = MemoryStore::new();
        let (note, key) = ecc_note("n1");

        restore_note(&store, &note, Some(&key)).unwrap();
        assert!(store.get("n1").unwrap().is_some());
        assert_eq!(store.get_key("n1").unwrap(), Some(key));
    }

    #[test]
    fn test_failed_insert_leaves_no_key_behind() {
        let store = FullStore {
            inner: MemoryStore::new(),
        };
        let (note, key) = ecc_note("n1");

        let err = restore_note(&store, &note, Some(&key)).unwrap_err();
        assert!(err.to_string().contains("disk is full"));
        assert!(store.get_key("n1").unwrap().is_none());
    }
}
