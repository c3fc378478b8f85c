// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text form of movable values.
//!
//! ```text
//! <begin>                             static value
//! <begin>,<end>,<token>[,<interval>]  animated value
//! ```
//!
//! Decimals are written with exactly the field's number of fractional digits.

use super::move_mode::MoveMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Untyped movable value fields, before range clamping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableParts {
    /// Value at the start of the object
    pub begin: Decimal,
    /// Value at the end of the object
    pub end: Decimal,
    /// How the value moves
    pub move_mode: MoveMode,
    /// Accelerate flag
    pub accelerating: bool,
    /// Decelerate flag
    pub decelerating: bool,
    /// Frame interval for interval-driven modes
    pub interval: i32,
}

impl MovableParts {
    /// Static value
    pub fn fixed(value: Decimal) -> Self {
        Self {
            begin: value,
            end: value,
            ..Self::default()
        }
    }
}

/// Round to `digits` places and write exactly that many fractional digits
pub fn format_decimal(value: Decimal, digits: u32) -> String {
    let mut rounded = value.round_dp(digits);
    rounded.rescale(digits);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Encode parts with `digits` fractional digits
pub fn encode(parts: &MovableParts, digits: u32) -> String {
    let begin = format_decimal(parts.begin, digits);
    if parts.move_mode == MoveMode::None {
        return begin;
    }

    let mut text = format!(
        "{begin},{},{}",
        format_decimal(parts.end, digits),
        parts
            .move_mode
            .token(parts.accelerating, parts.decelerating)
    );
    if parts.move_mode.has_interval() && parts.interval != 0 {
        text.push(',');
        text.push_str(&parts.interval.to_string());
    }
    text
}

/// Decode text into parts; `None` if the text does not follow the grammar
pub fn decode(text: &str) -> Option<MovableParts> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [value] => Some(MovableParts::fixed(Decimal::from_str(value).ok()?)),
        [begin, end, token] | [begin, end, token, _] => {
            let (move_mode, accelerating, decelerating) = MoveMode::parse_token(token)?;
            let interval = match fields.get(3) {
                Some(interval) => interval.parse().ok()?,
                None => 0,
            };
            Some(MovableParts {
                begin: Decimal::from_str(begin).ok()?,
                end: Decimal::from_str(end).ok()?,
                move_mode,
                accelerating,
                decelerating,
                interval,
            })
        }
        _ => None,
    }
}
