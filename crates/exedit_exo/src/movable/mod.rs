// SPDX-License-Identifier: MIT OR Apache-2.0
//! Movable values: numeric fields that are either static or animated.
//!
//! A [`MovableValue`] is parameterized by a [`MovableConstants`] type that
//! fixes its range and precision. Begin and end are clamped into range and
//! rounded on every assignment, so a value read from a file or set by code
//! always satisfies its field's limits.

pub mod codec;
pub mod move_mode;

pub use codec::MovableParts;
pub use move_mode::{MoveMode, MoveModeInfo};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Build a decimal from scaled integer units, e.g. `decimal(-12, 1)` is `-1.2`
pub const fn decimal(units: i64, scale: u32) -> Decimal {
    let magnitude = units.unsigned_abs();
    Decimal::from_parts(magnitude as u32, (magnitude >> 32) as u32, 0, units < 0, scale)
}

/// Range and precision of one kind of movable value
pub trait MovableConstants: 'static {
    /// Fractional digits
    const DIGITS: u32;
    /// Default value
    const DEFAULT: Decimal;
    /// Smallest storable value
    const MIN: Decimal;
    /// Largest storable value
    const MAX: Decimal;
    /// Lower end of the editing slider
    const MIN_SLIDER: Decimal;
    /// Upper end of the editing slider
    const MAX_SLIDER: Decimal;
}

/// Error parsing a movable value from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid movable value: {text:?}")]
pub struct MovableValueParseError {
    /// The rejected text
    pub text: String,
}

/// A static or animated numeric value limited by `C`
#[derive(Serialize, Deserialize)]
#[serde(from = "MovableParts", into = "MovableParts", bound = "")]
pub struct MovableValue<C: MovableConstants> {
    parts: MovableParts,
    #[serde(skip)]
    _constants: PhantomData<fn() -> C>,
}

impl<C: MovableConstants> MovableValue<C> {
    /// Clamp into `[MIN, MAX]` and round to `DIGITS` places
    pub fn clamp(value: Decimal) -> Decimal {
        let mut value = value.clamp(C::MIN, C::MAX).round_dp(C::DIGITS);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        value
    }

    /// Static value
    pub fn new(value: Decimal) -> Self {
        Self::from_parts(MovableParts::fixed(value))
    }

    /// Animated value moving from `begin` to `end`
    pub fn animated(begin: Decimal, end: Decimal, move_mode: MoveMode) -> Self {
        Self::from_parts(MovableParts {
            begin,
            end,
            move_mode,
            ..MovableParts::default()
        })
    }

    /// Build from untyped parts, clamping begin and end
    pub fn from_parts(parts: MovableParts) -> Self {
        Self {
            parts: MovableParts {
                begin: Self::clamp(parts.begin),
                end: Self::clamp(parts.end),
                ..parts
            },
            _constants: PhantomData,
        }
    }

    /// Untyped copy of the fields
    pub fn parts(&self) -> MovableParts {
        self.parts
    }

    /// Set accelerate/decelerate flags
    pub fn with_easing(mut self, accelerating: bool, decelerating: bool) -> Self {
        self.parts.accelerating = accelerating;
        self.parts.decelerating = decelerating;
        self
    }

    /// Set the frame interval
    pub fn with_interval(mut self, interval: i32) -> Self {
        self.parts.interval = interval;
        self
    }

    /// Value at the start
    pub fn begin(&self) -> Decimal {
        self.parts.begin
    }

    /// Set the start value (clamped and rounded)
    pub fn set_begin(&mut self, value: Decimal) {
        self.parts.begin = Self::clamp(value);
    }

    /// Value at the end
    pub fn end(&self) -> Decimal {
        self.parts.end
    }

    /// Set the end value (clamped and rounded)
    pub fn set_end(&mut self, value: Decimal) {
        self.parts.end = Self::clamp(value);
    }

    /// Move mode
    pub fn move_mode(&self) -> MoveMode {
        self.parts.move_mode
    }

    /// Set the move mode
    pub fn set_move_mode(&mut self, move_mode: MoveMode) {
        self.parts.move_mode = move_mode;
    }

    /// Whether the value moves
    pub fn is_animated(&self) -> bool {
        self.parts.move_mode != MoveMode::None
    }

    /// Accelerate flag
    pub fn is_accelerating(&self) -> bool {
        self.parts.accelerating
    }

    /// Set the accelerate flag
    pub fn set_accelerating(&mut self, accelerating: bool) {
        self.parts.accelerating = accelerating;
    }

    /// Decelerate flag
    pub fn is_decelerating(&self) -> bool {
        self.parts.decelerating
    }

    /// Set the decelerate flag
    pub fn set_decelerating(&mut self, decelerating: bool) {
        self.parts.decelerating = decelerating;
    }

    /// Frame interval
    pub fn interval(&self) -> i32 {
        self.parts.interval
    }

    /// Set the frame interval
    pub fn set_interval(&mut self, interval: i32) {
        self.parts.interval = interval;
    }
}

impl<C: MovableConstants> Default for MovableValue<C> {
    fn default() -> Self {
        Self::new(C::DEFAULT)
    }
}

impl<C: MovableConstants> Clone for MovableValue<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: MovableConstants> Copy for MovableValue<C> {}

impl<C: MovableConstants> PartialEq for MovableValue<C> {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl<C: MovableConstants> Eq for MovableValue<C> {}

impl<C: MovableConstants> fmt::Debug for MovableValue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MovableValue").field(&self.to_string()).finish()
    }
}

impl<C: MovableConstants> fmt::Display for MovableValue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(&self.parts, C::DIGITS))
    }
}

impl<C: MovableConstants> FromStr for MovableValue<C> {
    type Err = MovableValueParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        codec::decode(text)
            .map(Self::from_parts)
            .ok_or_else(|| MovableValueParseError {
                text: text.to_string(),
            })
    }
}

impl<C: MovableConstants> From<MovableParts> for MovableValue<C> {
    fn from(parts: MovableParts) -> Self {
        Self::from_parts(parts)
    }
}

impl<C: MovableConstants> From<MovableValue<C>> for MovableParts {
    fn from(value: MovableValue<C>) -> Self {
        value.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Percent;

    impl MovableConstants for Percent {
        const DIGITS: u32 = 2;
        const DEFAULT: Decimal = decimal(10000, 2);
        const MIN: Decimal = decimal(-10000, 2);
        const MAX: Decimal = decimal(50000, 2);
        const MIN_SLIDER: Decimal = Decimal::ZERO;
        const MAX_SLIDER: Decimal = decimal(800, 0);
    }

    type PercentValue = MovableValue<Percent>;

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn test_decimal_helper() {
        assert_eq!(decimal(-12, 1), dec("-1.2"));
        assert_eq!(decimal(99_999_999_999, 1), dec("9999999999.9"));
        assert_eq!(decimal(0, 3), Decimal::ZERO);
    }

    #[test]
    fn test_default() {
        let value = PercentValue::default();
        assert_eq!(value.begin(), dec("100"));
        assert_eq!(value.move_mode(), MoveMode::None);
        assert_eq!(value.to_string(), "100.00");
    }

    #[test]
    fn test_clamping_on_every_assignment() {
        let mut value = PercentValue::new(dec("1000"));
        assert_eq!(value.begin(), dec("500"));

        value.set_begin(dec("-1000"));
        assert_eq!(value.begin(), dec("-100"));

        value.set_end(dec("12.3456"));
        assert_eq!(value.end(), dec("12.35"));
        assert!(value.end().scale() <= Percent::DIGITS);

        for raw in ["-99999.999", "-100.005", "0.004", "499.995", "500.0000001"] {
            value.set_begin(dec(raw));
            assert!(value.begin() >= Percent::MIN && value.begin() <= Percent::MAX);
            assert!(value.begin().scale() <= Percent::DIGITS);
        }
    }

    #[test]
    fn test_static_round_trip() {
        let value = PercentValue::new(dec("10.5"));
        assert_eq!(value.to_string(), "10.50");

        let parsed: PercentValue = "10.50".parse().unwrap();
        assert_eq!(parsed, value);
        assert!(!parsed.is_animated());
    }

    #[test]
    fn test_animated_round_trip() {
        let value = PercentValue::animated(dec("0"), dec("100"), MoveMode::Linear).with_easing(true, false);
        assert_eq!(value.to_string(), "0.00,100.00,65");

        let parsed: PercentValue = "0.00,100.00,65".parse().unwrap();
        assert_eq!(parsed, value);
        assert!(parsed.is_accelerating());
        assert!(!parsed.is_decelerating());
    }

    #[test]
    fn test_parse_clamps() {
        let parsed: PercentValue = "9999,-9999,2".parse().unwrap();
        assert_eq!(parsed.begin(), dec("500"));
        assert_eq!(parsed.end(), dec("-100"));
    }

    #[test]
    fn test_interval_kept_but_not_always_written() {
        let mut value = PercentValue::animated(dec("1"), dec("2"), MoveMode::Linear).with_interval(40);
        assert_eq!(value.interval(), 40);
        assert_eq!(value.to_string(), "1.00,2.00,1");

        value.set_move_mode(MoveMode::Repeat);
        assert_eq!(value.to_string(), "1.00,2.00,8,40");
    }

    #[test]
    fn test_parse_errors() {
        assert!("0.0,1.0,0".parse::<PercentValue>().is_err());
        assert!("0.0,1.0,15".parse::<PercentValue>().is_err());
        let err = "x".parse::<PercentValue>().unwrap_err();
        assert_eq!(err.text, "x");
    }

    #[test]
    fn test_serde_clamps() {
        let value = PercentValue::animated(dec("5"), dec("6"), MoveMode::Curve);
        let ron_str = ron::to_string(&value).unwrap();
        let loaded: PercentValue = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, value);

        let out_of_range = ron_str.replace("\"5\"", "\"900\"");
        let loaded: PercentValue = ron::from_str(&out_of_range).unwrap();
        assert_eq!(loaded.begin(), dec("500"));
    }
}
