//! Passphrase and color sequence input.
//!
//! Both factors come from a flag or env var first, then an interactive
//! prompt. `--no-input` (or a non-terminal stdin) turns a missing factor
//! into an error instead of a prompt.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Password, Select};
use secrecy::SecretString;

use huenote_core::palette::SEQUENCE_LEN;
use huenote_core::{ColorSequence, PaletteColor};

use crate::constants::env_vars;
use crate::errors::CliError;
use crate::helpers::parse_colors;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassphraseMode {
    /// Unlock an existing note.
    Existing,
    /// Protect a new note; prompts twice.
    New,
}

fn can_prompt(no_input: bool) -> bool {
    !no_input && std::io::stdin().is_terminal()
}

/// Passphrase from HUENOTE_PASSPHRASE or a hidden prompt.
pub fn resolve_passphrase(mode: PassphraseMode, no_input: bool) -> anyhow::Result<SecretString> {
    if let Ok(value) = std::env::var(env_vars::PASSPHRASE) {
        if !value.is_empty() {
            tracing::debug!("passphrase taken from environment");
            return Ok(SecretString::from(value));
        }
    }

    if !can_prompt(no_input) {
        return Err(CliError::invalid_input_with_hint(
            "Passphrase required",
            "Hint: Set HUENOTE_PASSPHRASE or run without --no-input in a terminal.",
        )
        .into());
    }

    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt("Passphrase");
    if mode == PassphraseMode::New {
        prompt = prompt.with_confirmation("Confirm passphrase", "Passphrases do not match");
    }
    let value = prompt.interact()?;
    Ok(SecretString::from(value))
}

/// Color sequence from `--colors`, HUENOTE_COLORS or three pickers.
pub fn resolve_colors(flag: Option<&str>, no_input: bool) -> anyhow::Result<ColorSequence> {
    if let Some(value) = flag {
        return parse_colors(value);
    }
    if let Ok(value) = std::env::var(env_vars::COLORS) {
        if !value.trim().is_empty() {
            return parse_colors(&value);
        }
    }

    if !can_prompt(no_input) {
        return Err(CliError::invalid_input_with_hint(
            "Color sequence required",
            "Hint: Pass --colors red,lime,blue or set HUENOTE_COLORS.",
        )
        .into());
    }

    let theme = ColorfulTheme::default();
    let labels: Vec<String> = PaletteColor::ALL
        .iter()
        .map(|color| ui::palette_label(*color, true))
        .collect();

    let mut picked = [PaletteColor::ALL[0]; SEQUENCE_LEN];
    for (position, slot) in picked.iter_mut().enumerate() {
        let index = Select::with_theme(&theme)
            .with_prompt(format!("Color {} of {}", position + 1, SEQUENCE_LEN))
            .items(&labels)
            .default(0)
            .interact()?;
        *slot = PaletteColor::ALL[index];
    }
    Ok(ColorSequence::from_palette(picked))
}
