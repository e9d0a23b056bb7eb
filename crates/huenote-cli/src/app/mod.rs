//! Application-level utilities for the Huenote CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - The per-invocation context (config, store, note service)
//! - Passphrase and color sequence input

mod context;
mod resolver;
mod secrets;

// Re-export public API
pub use context::AppContext;
pub use secrets::{resolve_colors, resolve_passphrase, PassphraseMode};
