//! Palette rendering.

use owo_colors::OwoColorize;

use huenote_core::PaletteColor;

/// A two-cell block filled with the color, or `[]` without color support.
pub fn swatch(color: PaletteColor, enabled: bool) -> String {
    if !enabled {
        return "[]".to_string();
    }
    let (r, g, b) = color.rgb();
    format!("{}", "  ".on_truecolor(r, g, b))
}

/// `"<swatch> royal-blue  #4169E1"`, as used in pickers and `palette`.
pub fn palette_label(color: PaletteColor, enabled: bool) -> String {
    format!(
        "{} {:<16} {}",
        swatch(color, enabled),
        color.name(),
        color.hex()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        let label = palette_label(PaletteColor::Red, false);
        assert!(label.starts_with("[] red"));
        assert!(label.ends_with("#FF0000"));
    }

    #[test]
    fn test_colored_swatch_has_escape() {
        assert!(swatch(PaletteColor::Blue, true).contains('\u{1b}'));
    }
}
