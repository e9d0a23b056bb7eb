//! Storage abstraction layer.
//!
//! This module defines the `NoteRepository` and `PrivateKeyVault` traits
//! and their implementations.

pub mod json;
pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use json::{export_json, import_json, NoteArchive};
pub use memory::MemoryStore;
pub use sqlite::{IntegrityReport, SqliteStore};
pub use traits::{NoteRepository, PrivateKeyVault};
pub use types::{NoteFilter, WrappedKey};
