mod delete;
mod edit;
mod list;
mod show;
mod write;

pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
pub use show::handle_show;
pub use write::handle_write;

use huenote_core::storage::SqliteStore;
use huenote_core::{NoteRecord, NoteRepository};

use crate::errors::CliError;

fn find_note(store: &SqliteStore, id: &str) -> anyhow::Result<NoteRecord> {
    store.get(id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Note not found: {}", id),
            "Hint: Run `huenote list` to find note IDs.",
        )
        .into()
    })
}
