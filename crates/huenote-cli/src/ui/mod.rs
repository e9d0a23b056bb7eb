//! UI primitives for the Huenote CLI.
//!
//! - **Context**: color and interactivity detection
//! - **Theme**: palette swatches
//! - **Progress**: spinners for slow key work
//! - **Format**: string helpers for tables

mod context;
pub mod format;
pub mod progress;
pub mod theme;

pub use context::UiContext;
pub use progress::spinner;
pub use theme::{palette_label, swatch};
