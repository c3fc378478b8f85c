// SPDX-License-Identifier: MIT OR Apache-2.0
//! RGBA color as stored in text and edge color fields.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color. Only RGB is written to files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Six lowercase hex digits, `rrggbb`
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse exactly six hex digits into an opaque color
    pub fn from_hex(text: &str) -> Option<Self> {
        if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(text, 16).ok()?;
        Some(Self::rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Color::BLACK.to_hex(), "000000");
        assert_eq!(Color::WHITE.to_hex(), "ffffff");
        assert_eq!(Color::rgba(0x12, 0xab, 0x0f, 0).to_hex(), "12ab0f");

        assert_eq!(Color::from_hex("12AB0f"), Some(Color::rgb(0x12, 0xab, 0x0f)));
        assert_eq!(Color::from_hex("fff"), None);
        assert_eq!(Color::from_hex("+fffff"), None);
        assert_eq!(Color::from_hex("1000000"), None);
        assert_eq!(Color::from_hex("gggggg"), None);
    }
}
