// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed-width text stored as a hex dump of UTF-16 code units.
//!
//! A text of at most `max_len` code units is padded with NUL units to
//! `max_len + 1`, and every unit is written as four lowercase hex digits.

use super::{unsupported, FieldValue, ValueType};
use crate::error::Result;

/// Hex digits per UTF-16 code unit
const UNIT_DIGITS: usize = 4;

/// Longest prefix of `text` holding at most `max_len` UTF-16 code units.
///
/// Cuts only at character boundaries, so a surrogate pair is never split.
pub fn truncate_utf16(text: &str, max_len: usize) -> &str {
    let mut units = 0;
    for (index, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > max_len {
            return &text[..index];
        }
    }
    text
}

/// Converts text to and from its fixed-width UTF-16 hex form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthTextConverter {
    max_len: usize,
}

impl FixedWidthTextConverter {
    /// Create a converter for texts of at most `max_len` UTF-16 code units
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Convert a text value to its hex form; `Ok(None)` if it is too long
    pub fn to_text(&self, value: &FieldValue, value_type: ValueType) -> Result<Option<String>> {
        if !matches!(value_type, ValueType::Text) {
            return Err(unsupported(ValueType::Text, value_type));
        }
        let FieldValue::Text(text) = value else {
            return Err(value.mismatch(value_type));
        };

        let units: Vec<u16> = text.encode_utf16().collect();
        if units.len() > self.max_len {
            return Ok(None);
        }

        let hex: String = units
            .into_iter()
            .chain(std::iter::repeat(0))
            .take(self.max_len + 1)
            .map(|unit| format!("{unit:04x}"))
            .collect();
        Ok(Some(hex))
    }

    /// Convert the hex form back to text; `Ok(None)` if it is malformed
    pub fn from_text(&self, text: &str, value_type: ValueType) -> Result<Option<FieldValue>> {
        if !matches!(value_type, ValueType::Text) {
            return Err(unsupported(ValueType::Text, value_type));
        }
        let Some(units) = decode_units(text) else {
            return Ok(None);
        };

        let end = units.iter().position(|unit| *unit == 0).unwrap_or(units.len());
        if end > self.max_len {
            return Ok(None);
        }
        Ok(String::from_utf16(&units[..end]).ok().map(FieldValue::Text))
    }
}

fn decode_units(text: &str) -> Option<Vec<u16>> {
    let bytes = text.as_bytes();
    if bytes.len() % UNIT_DIGITS != 0 || !bytes.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    bytes
        .chunks(UNIT_DIGITS)
        .map(|group| {
            let group = std::str::from_utf8(group).ok()?;
            u16::from_str_radix(group, 16).ok()
        })
        .collect()
}
