// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text <-> value conversion for marshalled fields.
//!
//! Converters form a closed set selected by [`ConverterKind`]:
//! - [`ConverterKind::Default`]: strings, booleans, enums, colors and a
//!   generic numeric fallback (integers, decimals, movable values)
//! - [`ConverterKind::SignedSpacing`]: signed `-100..=100` stored as a byte
//! - [`ConverterKind::FixedWidthText`]: NUL-padded UTF-16 hex dump
//!
//! Every conversion returns `Ok(None)` when the input cannot be represented,
//! and `Err` only when the caller paired a value with the wrong declared type.

pub mod default;
pub mod fixed_text;
pub mod registry;
pub mod spacing;

pub use default::DefaultConverter;
pub use fixed_text::FixedWidthTextConverter;
pub use registry::ConverterRegistry;
pub use spacing::SignedSpacingConverter;

use crate::color::Color;
use crate::error::{ExoError, Result};
use crate::movable::{MovableConstants, MovableParts, MovableValue};
use rust_decimal::Decimal;
use thiserror::Error;

/// Integer-backed enumeration stored as its numeric value
pub trait ExoEnum: Copy + 'static {
    /// Member with this raw value, if one is defined
    fn from_raw(raw: i64) -> Option<Self>;
    /// Raw value of this member
    fn raw(self) -> i64;
}

fn is_defined<E: ExoEnum>(raw: i64) -> bool {
    E::from_raw(raw).is_some()
}

/// Declared type of a field
#[derive(Debug, Clone, Copy)]
pub enum ValueType {
    /// Free text
    Text,
    /// Boolean
    Bool,
    /// Enumeration; `is_defined` tells whether a raw value names a member
    Enum {
        /// Membership test
        is_defined: fn(i64) -> bool,
    },
    /// RGB color
    Color,
    /// Integer
    Int,
    /// Decimal
    Decimal,
    /// Movable value with this many fractional digits
    Movable {
        /// Fractional digits
        digits: u32,
    },
}

impl ValueType {
    /// Declared type for the enumeration `E`
    pub fn enumeration<E: ExoEnum>() -> Self {
        Self::Enum {
            is_defined: is_defined::<E>,
        }
    }

    /// Declared type for movable values limited by `C`
    pub fn movable<C: MovableConstants>() -> Self {
        Self::Movable { digits: C::DIGITS }
    }

    /// Short name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Enum { .. } => "enum",
            Self::Color => "color",
            Self::Int => "int",
            Self::Decimal => "decimal",
            Self::Movable { .. } => "movable",
        }
    }
}

/// Runtime value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text
    Text(String),
    /// Boolean
    Bool(bool),
    /// Raw enum value
    Enum(i64),
    /// RGB color
    Color(Color),
    /// Integer
    Int(i64),
    /// Decimal
    Decimal(Decimal),
    /// Movable value fields
    Movable(MovableParts),
}

impl FieldValue {
    /// Short name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Enum(_) => "enum",
            Self::Color(_) => "color",
            Self::Int(_) => "int",
            Self::Decimal(_) => "decimal",
            Self::Movable(_) => "movable",
        }
    }

    /// Raw value of an enum member
    pub fn from_enum<E: ExoEnum>(value: E) -> Self {
        Self::Enum(value.raw())
    }

    /// Convert back into the enumeration `E`
    pub fn into_enum<E: ExoEnum>(self) -> std::result::Result<E, ValueMismatch> {
        match self {
            Self::Enum(raw) => E::from_raw(raw).ok_or(ValueMismatch),
            _ => Err(ValueMismatch),
        }
    }

    /// Convert into a movable value, clamping to its range
    pub fn into_movable<C: MovableConstants>(self) -> std::result::Result<MovableValue<C>, ValueMismatch> {
        match self {
            Self::Movable(parts) => Ok(MovableValue::from_parts(parts)),
            _ => Err(ValueMismatch),
        }
    }

    /// Error for a value that does not match `expected`
    pub(crate) fn mismatch(&self, expected: ValueType) -> ExoError {
        ExoError::ValueTypeMismatch {
            expected: expected.name(),
            found: self.type_name(),
        }
    }
}

/// Error for a specialized converter used with a declared type it cannot handle
pub(crate) fn unsupported(supported: ValueType, declared: ValueType) -> ExoError {
    ExoError::ValueTypeMismatch {
        expected: supported.name(),
        found: declared.name(),
    }
}

/// Field value variant does not fit the target property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Field value does not fit the target property")]
pub struct ValueMismatch;

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Color> for FieldValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl<C: MovableConstants> From<MovableValue<C>> for FieldValue {
    fn from(value: MovableValue<C>) -> Self {
        Self::Movable(value.parts())
    }
}

impl TryFrom<FieldValue> for String {
    type Error = ValueMismatch;

    fn try_from(value: FieldValue) -> std::result::Result<Self, ValueMismatch> {
        match value {
            FieldValue::Text(text) => Ok(text),
            _ => Err(ValueMismatch),
        }
    }
}

impl TryFrom<FieldValue> for bool {
    type Error = ValueMismatch;

    fn try_from(value: FieldValue) -> std::result::Result<Self, ValueMismatch> {
        match value {
            FieldValue::Bool(flag) => Ok(flag),
            _ => Err(ValueMismatch),
        }
    }
}

impl TryFrom<FieldValue> for i32 {
    type Error = ValueMismatch;

    fn try_from(value: FieldValue) -> std::result::Result<Self, ValueMismatch> {
        match value {
            FieldValue::Int(number) => i32::try_from(number).map_err(|_| ValueMismatch),
            _ => Err(ValueMismatch),
        }
    }
}

impl TryFrom<FieldValue> for Color {
    type Error = ValueMismatch;

    fn try_from(value: FieldValue) -> std::result::Result<Self, ValueMismatch> {
        match value {
            FieldValue::Color(color) => Ok(color),
            _ => Err(ValueMismatch),
        }
    }
}

impl TryFrom<FieldValue> for Decimal {
    type Error = ValueMismatch;

    fn try_from(value: FieldValue) -> std::result::Result<Self, ValueMismatch> {
        match value {
            FieldValue::Decimal(number) => Ok(number),
            _ => Err(ValueMismatch),
        }
    }
}

/// Which converter a field uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConverterKind {
    /// Type-driven default conversion
    #[default]
    Default,
    /// Signed spacing stored as an unsigned byte
    SignedSpacing,
    /// Fixed-width UTF-16 hex text holding at most `max_len` code units
    FixedWidthText {
        /// Maximum text length in UTF-16 code units
        max_len: usize,
    },
}

/// A resolved converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converter {
    /// Type-driven default conversion
    Default(DefaultConverter),
    /// Signed spacing stored as an unsigned byte
    SignedSpacing(SignedSpacingConverter),
    /// Fixed-width UTF-16 hex text
    FixedWidthText(FixedWidthTextConverter),
}

impl Converter {
    /// Construct the converter for `kind`
    pub fn for_kind(kind: ConverterKind) -> Self {
        match kind {
            ConverterKind::Default => Self::Default(DefaultConverter),
            ConverterKind::SignedSpacing => Self::SignedSpacing(SignedSpacingConverter),
            ConverterKind::FixedWidthText { max_len } => {
                Self::FixedWidthText(FixedWidthTextConverter::new(max_len))
            }
        }
    }

    /// Convert a value to text; `Ok(None)` if it cannot be represented
    pub fn to_text(&self, value: &FieldValue, value_type: ValueType) -> Result<Option<String>> {
        match self {
            Self::Default(converter) => converter.to_text(value, value_type),
            Self::SignedSpacing(converter) => converter.to_text(value, value_type),
            Self::FixedWidthText(converter) => converter.to_text(value, value_type),
        }
    }

    /// Convert text to a value; `Ok(None)` if the text is malformed
    pub fn from_text(&self, text: &str, value_type: ValueType) -> Result<Option<FieldValue>> {
        match self {
            Self::Default(converter) => converter.from_text(text, value_type),
            Self::SignedSpacing(converter) => converter.from_text(text, value_type),
            Self::FixedWidthText(converter) => converter.from_text(text, value_type),
        }
    }
}
