//! RGBA color values and CSS-style hex notation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An RGBA color with 8 bits per channel (straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned when a hex color literal cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color literal: {0:?}")]
pub struct ParseColorError(String);

impl Color {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` notation (the forms a color
    /// picker produces).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(&err)?.trim();

        let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| err());
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::opaque(r, g, b))
            }
            6 => Ok(Self::opaque(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(Color::from_hex("#0f172a").unwrap(), Color::opaque(15, 23, 42));
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_short_form() {
        // #fff expands per-nibble
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::opaque(255, 0, 0));
    }

    #[test]
    fn test_parse_with_alpha() {
        assert_eq!(
            Color::from_hex("#10b98180").unwrap(),
            Color::new(16, 185, 129, 128)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::from_hex("0f172a").is_err()); // missing '#'
        assert!(Color::from_hex("#12345").is_err()); // bad length
        assert!(Color::from_hex("#zzzzzz").is_err()); // bad digits
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::opaque(59, 130, 246);
        assert_eq!(Color::from_hex(&c.to_hex()).unwrap(), c);
        assert_eq!(c.to_hex(), "#3b82f6");

        let translucent = Color::new(239, 68, 68, 10);
        assert_eq!(Color::from_hex(&translucent.to_hex()).unwrap(), translucent);
    }
}
