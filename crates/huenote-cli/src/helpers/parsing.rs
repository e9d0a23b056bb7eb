//! Parsing for algorithm and color arguments.

use huenote_core::palette::SEQUENCE_LEN;
use huenote_core::{Algorithm, ColorSequence, PaletteColor};

use crate::errors::CliError;

pub fn parse_algorithm(value: &str) -> anyhow::Result<Algorithm> {
    value.parse::<Algorithm>().map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Unknown algorithm: {}", value),
            "Hint: Use aes-gcm, rsa-oaep or ecc.",
        )
        .into()
    })
}

/// Parse `"red, lime, #0000FF"` into a palette sequence.
///
/// Entries may be names or hex codes; the result always holds the
/// canonical hex identifiers, so `red` and `#ff0000` unlock the same note.
pub fn parse_colors(value: &str) -> anyhow::Result<ColorSequence> {
    let parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() != SEQUENCE_LEN {
        return Err(CliError::invalid_input_with_hint(
            format!(
                "Expected {} colors, got {}",
                SEQUENCE_LEN,
                parts.len()
            ),
            "Hint: Pass three comma-separated colors, e.g. red,lime,blue.",
        )
        .into());
    }

    let mut colors = [PaletteColor::ALL[0]; SEQUENCE_LEN];
    for (slot, part) in colors.iter_mut().zip(&parts) {
        *slot = part.parse::<PaletteColor>().map_err(|_| {
            CliError::invalid_input_with_hint(
                format!("Unknown color: {}", part),
                "Hint: Run `huenote palette` to see the available colors.",
            )
        })?;
    }
    Ok(ColorSequence::from_palette(colors))
}
