//! Output formatting for notes.

mod json;
mod text;

pub use json::{note_body_json, note_summary_json};
pub use text::{note_table, print_note};
