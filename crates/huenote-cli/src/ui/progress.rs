//! Spinners for key generation and derivation.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

/// A spinner on stderr, hidden when animation is off.
///
/// Callers must `finish_and_clear` before printing to the terminal.
pub fn spinner(ctx: &UiContext, message: &str) -> ProgressBar {
    if !ctx.animate {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
