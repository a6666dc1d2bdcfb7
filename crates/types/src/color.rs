//! The RGB color value shared by every input surface of the picker.
//!
//! A `Color` is the single source of truth of the dialog. Sliders, numeric
//! fields, the hex field and the preview swatch are all replicas of it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a hex color code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorCodeError {
    #[error("color code is empty")]
    Empty,
    #[error("color code has {0} digits, expected 3 or 6")]
    InvalidLength(usize),
    #[error("invalid hex digit '{0}' in color code")]
    InvalidDigit(char),
}

/// Opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array in R, G, B order
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Color with every channel flipped, used for drawing the crosshair
    /// so that it stays visible on top of the selected color.
    pub fn inverse(&self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Squared euclidean distance in RGB space
    pub fn distance_squared(&self, other: &Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Upper-case `#RRGGBB` color code
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive)
    pub fn from_hex(code: &str) -> Result<Self, ColorCodeError> {
        let code = code.trim();
        let digits = code.strip_prefix('#').unwrap_or(code);
        if digits.is_empty() {
            return Err(ColorCodeError::Empty);
        }

        let mut values = Vec::with_capacity(6);
        for c in digits.chars() {
            let v = c.to_digit(16).ok_or(ColorCodeError::InvalidDigit(c))?;
            values.push(v as u8);
        }

        match values.as_slice() {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(
                r1 << 4 | r0,
                g1 << 4 | g0,
                b1 << 4 | b0,
            )),
            other => Err(ColorCodeError::InvalidLength(other.len())),
        }
    }

    /// Float components in 0.0..=1.0, as expected by cairo
    pub fn to_rgb_f64(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Apply to Cairo context
    #[cfg(feature = "gtk")]
    pub fn apply_to_cairo(&self, cr: &cairo::Context) {
        let (r, g, b) = self.to_rgb_f64();
        cr.set_source_rgb(r, g, b);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting_is_upper_case() {
        assert_eq!(Color::new(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(Color::new(10, 171, 205).to_hex(), "#0AABCD");
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_hex_parsing_forms() {
        let expected = Color::new(0x12, 0xAB, 0xEF);
        assert_eq!(Color::from_hex("#12ABEF"), Ok(expected));
        assert_eq!(Color::from_hex("12abef"), Ok(expected));
        assert_eq!(Color::from_hex("  #12aBeF \n"), Ok(expected));
        assert_eq!(Color::from_hex("#F0A"), Ok(Color::new(0xFF, 0x00, 0xAA)));
        assert_eq!("fff".parse::<Color>(), Ok(Color::WHITE));
    }

    #[test]
    fn test_hex_parsing_rejects_malformed() {
        assert_eq!(Color::from_hex(""), Err(ColorCodeError::Empty));
        assert_eq!(Color::from_hex("#"), Err(ColorCodeError::Empty));
        assert_eq!(Color::from_hex("#12345"), Err(ColorCodeError::InvalidLength(5)));
        assert_eq!(Color::from_hex("#1234567"), Err(ColorCodeError::InvalidLength(7)));
        assert_eq!(Color::from_hex("#GG0000"), Err(ColorCodeError::InvalidDigit('G')));
        assert_eq!(Color::from_hex("##FF0000"), Err(ColorCodeError::InvalidDigit('#')));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(Color::WHITE.inverse(), Color::BLACK);
        assert_eq!(Color::new(10, 200, 128).inverse(), Color::new(245, 55, 127));
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Color::BLACK.distance_squared(&Color::BLACK), 0);
        assert_eq!(Color::BLACK.distance_squared(&Color::WHITE), 3 * 255 * 255);
        assert_eq!(
            Color::new(10, 20, 30).distance_squared(&Color::new(13, 16, 30)),
            25
        );
    }

    #[test]
    fn test_serializes_as_hex_code() {
        let json = serde_json::to_string(&Color::new(255, 128, 0)).unwrap();
        assert_eq!(json, "\"#FF8000\"");

        let parsed: Color = serde_json::from_str("\"#00ff7f\"").unwrap();
        assert_eq!(parsed, Color::new(0, 255, 127));

        assert!(serde_json::from_str::<Color>("\"not a color\"").is_err());
    }
}
