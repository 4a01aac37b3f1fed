//! Color parsing and scheme derivation for the breathing indicator.
//!
//! Patterns carry their colors as `#RRGGBB` strings. This module parses them
//! into [`Rgb`] values and derives the indicator gradient plus a darkened
//! background tone. Color is cosmetic: a malformed identifier is reported as
//! a [`ColorError`] and the widget keeps its previous scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::BreathingPattern;

/// Fixed top stop of the background gradient (dark slate).
const BACKGROUND_TOP: Rgb = Rgb::new(26, 32, 44);

/// Divisor applied to each start-color channel to get the background bottom
/// stop.
const BACKGROUND_DIM_DIVISOR: u8 = 4;

// ============================================================================
// ColorError
// ============================================================================

/// Errors that can occur while parsing a color identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not in `#RRGGBB` form.
    #[error("'{0}' is not a valid #RRGGBB color")]
    Malformed(String),
}

// ============================================================================
// Rgb
// ============================================================================

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Creates a color from the given channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` string.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let malformed = || ColorError::Malformed(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(malformed)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(malformed());
        }

        let channel = |range| u8::from_str_radix(&hex[range], 16).map_err(|_| malformed());
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Returns the color dimmed by dividing each channel.
    pub fn dimmed(self, divisor: u8) -> Self {
        let divisor = divisor.max(1);
        Self {
            r: self.r / divisor,
            g: self.g / divisor,
            b: self.b / divisor,
        }
    }

    /// Formats the color as a `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// ColorScheme
// ============================================================================

/// The colors the presentation layer renders: the indicator gradient and an
/// ambient background gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Indicator gradient start
    pub circle_start: Rgb,
    /// Indicator gradient end
    pub circle_end: Rgb,
    /// Background gradient top stop
    pub background_top: Rgb,
    /// Background gradient bottom stop
    pub background_bottom: Rgb,
}

impl ColorScheme {
    /// Derives the scheme for a pattern.
    ///
    /// The background bottom stop is the start color with each channel
    /// divided by four, over the fixed dark top stop.
    pub fn for_pattern(pattern: &BreathingPattern) -> Result<Self, ColorError> {
        let start = Rgb::parse(&pattern.color_start)?;
        let end = Rgb::parse(&pattern.color_end)?;

        Ok(Self {
            circle_start: start,
            circle_end: end,
            background_top: BACKGROUND_TOP,
            background_bottom: start.dimmed(BACKGROUND_DIM_DIVISOR),
        })
    }
}

impl Default for ColorScheme {
    /// The teal-on-slate scheme shown before any pattern is applied.
    fn default() -> Self {
        Self {
            circle_start: Rgb::new(79, 209, 197),
            circle_end: Rgb::new(56, 178, 172),
            background_top: BACKGROUND_TOP,
            background_bottom: Rgb::new(45, 55, 72),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
