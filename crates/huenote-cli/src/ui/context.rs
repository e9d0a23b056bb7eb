//! Terminal detection for UI decisions.

use std::io::IsTerminal;

#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    /// Color output on stdout
    pub color: bool,
    /// Spinners on stderr
    pub animate: bool,
}

impl UiContext {
    pub fn from_env(quiet: bool) -> Self {
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        let color = std::io::stdout().is_terminal() && !no_color_env && !term_is_dumb;
        let animate = !quiet && std::io::stderr().is_terminal() && !term_is_dumb;
        Self { color, animate }
    }
}
