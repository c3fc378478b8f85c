// SPDX-License-Identifier: MIT OR Apache-2.0
//! Character spacing stored as an unsigned byte.

use super::{unsupported, FieldValue, ValueType};
use crate::error::Result;

/// Smallest spacing value
pub const SPACING_MIN: i64 = -100;
/// Largest spacing value
pub const SPACING_MAX: i64 = 100;

/// Writes a signed spacing in `-100..=100` as its two's-complement byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignedSpacingConverter;

impl SignedSpacingConverter {
    /// Convert a spacing value to byte text
    pub fn to_text(&self, value: &FieldValue, value_type: ValueType) -> Result<Option<String>> {
        if !matches!(value_type, ValueType::Int) {
            return Err(unsupported(ValueType::Int, value_type));
        }
        let FieldValue::Int(spacing) = value else {
            return Err(value.mismatch(value_type));
        };
        let clamped = (*spacing).clamp(SPACING_MIN, SPACING_MAX) as i8;
        Ok(Some((clamped as u8).to_string()))
    }

    /// Convert byte text to a spacing value
    pub fn from_text(&self, text: &str, value_type: ValueType) -> Result<Option<FieldValue>> {
        if !matches!(value_type, ValueType::Int) {
            return Err(unsupported(ValueType::Int, value_type));
        }
        let Ok(byte) = text.trim().parse::<u8>() else {
            return Ok(None);
        };
        let spacing = i64::from(byte as i8).clamp(SPACING_MIN, SPACING_MAX);
        Ok(Some(FieldValue::Int(spacing)))
    }
}
