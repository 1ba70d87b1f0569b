//! Event colours and readable text colour selection.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Colour used when an event has none stored.
pub const DEFAULT_COLOUR: &str = "#4a90e2";

/// YIQ brightness at or above which dark text is used.
const YIQ_THRESHOLD: u32 = 128;

/// A display colour as stored in the `colour` column.
///
/// The raw string is kept verbatim so whatever the store holds is written
/// back unchanged. Parsing only happens when the RGB value is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Colour(String);

impl Colour {
    pub fn new(value: impl Into<String>) -> Self {
        Colour(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional, case-insensitive).
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.trim().trim_start_matches('#');

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };

        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }

    /// Pick the text colour that stays readable on this background.
    ///
    /// Colours that don't parse are treated as the default colour.
    pub fn contrast_text(&self) -> TextColour {
        let (r, g, b) = self
            .rgb()
            .or_else(|| Colour::default().rgb())
            .unwrap_or((0, 0, 0));

        let yiq = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;

        if yiq >= YIQ_THRESHOLD {
            TextColour::Dark
        } else {
            TextColour::Light
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour(DEFAULT_COLOUR.to_string())
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Colour {
    fn from(s: &str) -> Self {
        Colour::new(s)
    }
}

impl<'de> Deserialize<'de> for Colour {
    /// Null and empty strings both mean "no colour chosen".
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(s) if !s.trim().is_empty() => Colour(s),
            _ => Colour::default(),
        })
    }
}

/// Foreground colour for text drawn on top of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColour {
    Dark,
    Light,
}

impl TextColour {
    /// CSS colour name understood by the calendar widget.
    pub fn css(&self) -> &'static str {
        match self {
            TextColour::Dark => "black",
            TextColour::Light => "white",
        }
    }
}

impl fmt::Display for TextColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css())
    }
}
