use std::path::Path;

use huenote_core::storage::export_json;
use huenote_core::{NoteFilter, NoteRepository, PrivateKeyVault};

use crate::app::AppContext;
use crate::cli::ExportArgs;

/// Write every note, plus the wrapped keys of asymmetric notes.
///
/// Nothing is decrypted; the archive is as safe as the store itself.
pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let notes = store.list(&NoteFilter::new())?;

    let mut keys = Vec::new();
    for note in notes.iter().filter(|note| note.algorithm.is_asymmetric()) {
        match store.get_key(&note.id)? {
            Some(key) => keys.push(key),
            None => tracing::warn!(note_id = %note.id, "exporting note without its private key"),
        }
    }

    export_json(Path::new(&args.destination), &notes, &keys)?;
    if !ctx.quiet() {
        println!("Exported {} notes to {}", notes.len(), args.destination);
    }
    Ok(())
}
