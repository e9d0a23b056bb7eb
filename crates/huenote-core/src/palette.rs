//! The fixed color palette and the ordered color sequence second factor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};

/// Number of colors in a sequence.
pub const SEQUENCE_LEN: usize = 3;

/// One of the 15 palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Red,
    OrangeRed,
    DarkOrange,
    Gold,
    GreenYellow,
    Lime,
    DarkTurquoise,
    Blue,
    RoyalBlue,
    BlueViolet,
    DeepPink,
    HotPink,
    Pink,
    Khaki,
    Plum,
}

impl PaletteColor {
    /// Every palette color, in display order.
    pub const ALL: [PaletteColor; 15] = [
        PaletteColor::Red,
        PaletteColor::OrangeRed,
        PaletteColor::DarkOrange,
        PaletteColor::Gold,
        PaletteColor::GreenYellow,
        PaletteColor::Lime,
        PaletteColor::DarkTurquoise,
        PaletteColor::Blue,
        PaletteColor::RoyalBlue,
        PaletteColor::BlueViolet,
        PaletteColor::DeepPink,
        PaletteColor::HotPink,
        PaletteColor::Pink,
        PaletteColor::Khaki,
        PaletteColor::Plum,
    ];

    /// Canonical `#RRGGBB` identifier. This is what enters key derivation.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Red => "#FF0000",
            Self::OrangeRed => "#FF4500",
            Self::DarkOrange => "#FF8C00",
            Self::Gold => "#FFD700",
            Self::GreenYellow => "#ADFF2F",
            Self::Lime => "#00FF00",
            Self::DarkTurquoise => "#00CED1",
            Self::Blue => "#0000FF",
            Self::RoyalBlue => "#4169E1",
            Self::BlueViolet => "#8A2BE2",
            Self::DeepPink => "#FF1493",
            Self::HotPink => "#FF69B4",
            Self::Pink => "#FFC0CB",
            Self::Khaki => "#F0E68C",
            Self::Plum => "#DDA0DD",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::OrangeRed => "orange-red",
            Self::DarkOrange => "dark-orange",
            Self::Gold => "gold",
            Self::GreenYellow => "green-yellow",
            Self::Lime => "lime",
            Self::DarkTurquoise => "dark-turquoise",
            Self::Blue => "blue",
            Self::RoyalBlue => "royal-blue",
            Self::BlueViolet => "blue-violet",
            Self::DeepPink => "deep-pink",
            Self::HotPink => "hot-pink",
            Self::Pink => "pink",
            Self::Khaki => "khaki",
            Self::Plum => "plum",
        }
    }

    /// RGB components, for terminal swatches.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    /// Look up a palette color by its exact canonical identifier.
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|color| color.hex() == hex)
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl FromStr for PaletteColor {
    type Err = NoteError;

    /// Accepts `#RRGGBB` (any case) or a color name (`royal-blue`,
    /// `Royal Blue`, `royal_blue`).
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.starts_with('#') {
            let upper = trimmed.to_ascii_uppercase();
            return Self::from_hex(&upper).ok_or_else(|| {
                NoteError::Validation(format!("{} is not a palette color", trimmed))
            });
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.name().replace('-', "") == normalized)
            .ok_or_else(|| NoteError::Validation(format!("Unknown palette color: {}", trimmed)))
    }
}

/// An ordered sequence of exactly three color identifiers.
///
/// Order matters: `[A, B, C]` and `[C, B, A]` derive different keys.
/// The type does not require palette membership; use
/// [`ColorSequence::ensure_palette`] where that is a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColorSequence {
    colors: [String; SEQUENCE_LEN],
}

impl ColorSequence {
    /// Build a sequence from caller-supplied identifiers, kept verbatim.
    pub fn new<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        Self::try_from(colors)
    }

    /// Build a sequence from palette colors.
    pub fn from_palette(colors: [PaletteColor; SEQUENCE_LEN]) -> Self {
        Self {
            colors: colors.map(|color| color.hex().to_string()),
        }
    }

    /// The identifiers in order.
    pub fn as_slice(&self) -> &[String] {
        &self.colors
    }

    /// Fail unless every identifier is a canonical palette color.
    pub fn ensure_palette(&self) -> Result<()> {
        for color in &self.colors {
            if PaletteColor::from_hex(color).is_none() {
                return Err(NoteError::Validation(format!(
                    "{} is not a palette color",
                    color
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for ColorSequence {
    type Error = NoteError;

    fn try_from(colors: Vec<String>) -> Result<Self> {
        let len = colors.len();
        let colors: [String; SEQUENCE_LEN] = colors.try_into().map_err(|_| {
            NoteError::Validation(format!(
                "Color sequence must have exactly {} colors (got {})",
                SEQUENCE_LEN, len
            ))
        })?;
        Ok(Self { colors })
    }
}

impl From<ColorSequence> for Vec<String> {
    fn from(sequence: ColorSequence) -> Self {
        sequence.colors.into()
    }
}

impl fmt::Display for ColorSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.colors.join(" -> "))
    }
}
