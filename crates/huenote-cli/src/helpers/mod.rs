//! Helper utilities for CLI commands.

mod input;
mod parsing;

pub use input::read_note_body;
pub use parsing::{parse_algorithm, parse_colors};
