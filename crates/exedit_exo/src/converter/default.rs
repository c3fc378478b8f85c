// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type-driven default conversion.

use super::{FieldValue, ValueType};
use crate::color::Color;
use crate::error::Result;
use crate::movable::codec;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Converts by declared type: text, bool, enum, color, then numeric fallback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConverter;

impl DefaultConverter {
    /// Convert a value to text
    pub fn to_text(&self, value: &FieldValue, value_type: ValueType) -> Result<Option<String>> {
        let text = match (value_type, value) {
            (ValueType::Text, FieldValue::Text(text)) => text.clone(),
            (ValueType::Bool, FieldValue::Bool(flag)) => (if *flag { "1" } else { "0" }).to_string(),
            (ValueType::Enum { .. }, FieldValue::Enum(raw)) => raw.to_string(),
            (ValueType::Color, FieldValue::Color(color)) => color.to_hex(),
            (ValueType::Int, FieldValue::Int(number)) => number.to_string(),
            (ValueType::Decimal, FieldValue::Decimal(number)) => number.to_string(),
            (ValueType::Movable { digits }, FieldValue::Movable(parts)) => codec::encode(parts, digits),
            (expected, value) => return Err(value.mismatch(expected)),
        };
        Ok(Some(text))
    }

    /// Convert text to a value
    pub fn from_text(&self, text: &str, value_type: ValueType) -> Result<Option<FieldValue>> {
        let value = match value_type {
            ValueType::Text => Some(FieldValue::Text(text.to_string())),
            ValueType::Bool => parse_int(text).map(|number| FieldValue::Bool(number != 0)),
            ValueType::Enum { is_defined } => parse_int(text)
                .filter(|raw| is_defined(*raw))
                .map(FieldValue::Enum),
            ValueType::Color => Color::from_hex(text).map(FieldValue::Color),
            ValueType::Int => parse_int(text)
                .or_else(|| integral_decimal(text))
                .map(FieldValue::Int),
            ValueType::Decimal => parse_decimal(text).map(FieldValue::Decimal),
            ValueType::Movable { .. } => codec::decode(text).map(FieldValue::Movable),
        };
        Ok(value)
    }
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

/// Integer held in decimal notation, e.g. `30.0`
fn integral_decimal(text: &str) -> Option<i64> {
    let number = parse_decimal(text)?;
    if !number.fract().is_zero() {
        return None;
    }
    number.to_i64()
}
