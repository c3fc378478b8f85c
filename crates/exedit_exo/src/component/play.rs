// SPDX-License-Identifier: MIT OR Apache-2.0
//! Standard playback filter (`標準再生`).

use super::{field, marker_field, movable_constants, ComponentRecord};
use crate::converter::ValueType;
use crate::field::{ExoRecord, FieldTable};
use crate::movable::{decimal, MovableValue};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

movable_constants! {
    /// Volume in percent
    pub struct Volume {
        digits: 1,
        default: decimal(1000, 1),
        min: decimal(0, 1),
        max: decimal(5000, 1),
        min_slider: decimal(0, 1),
        max_slider: decimal(5000, 1),
    }
}

movable_constants! {
    /// Stereo balance, negative is left
    pub struct Pan {
        digits: 1,
        default: decimal(0, 1),
        min: decimal(-1000, 1),
        max: decimal(1000, 1),
        min_slider: decimal(-1000, 1),
        max_slider: decimal(1000, 1),
    }
}

/// Standard playback settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayComponent {
    /// Volume
    pub volume: MovableValue<Volume>,
    /// Left/right balance
    pub pan: MovableValue<Pan>,
}

static PLAY_FIELDS: Lazy<FieldTable<PlayComponent>> = Lazy::new(|| {
    FieldTable::new(vec![
        marker_field(),
        field!(PlayComponent, "音量", 0, ValueType::movable::<Volume>(), movable volume),
        field!(PlayComponent, "左右", 1, ValueType::movable::<Pan>(), movable pan),
    ])
});

impl ExoRecord for PlayComponent {
    fn field_table() -> &'static FieldTable<Self> {
        &PLAY_FIELDS
    }
}

impl ComponentRecord for PlayComponent {
    const MARKER: &'static str = "標準再生";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movable::MoveMode;

    #[test]
    fn test_default_items() {
        let items = PlayComponent::default().to_items().unwrap();
        assert_eq!(items.to_string(), "_name=標準再生\r\n音量=100.0\r\n左右=0.0");
    }

    #[test]
    fn test_fade_round_trip() {
        let component = PlayComponent {
            volume: MovableValue::animated(decimal(1000, 1), decimal(0, 1), MoveMode::Linear).with_easing(false, true),
            ..PlayComponent::default()
        };
        let items = component.to_items().unwrap();
        assert_eq!(items.value("音量"), Some("100.0,0.0,33"));
        assert_eq!(PlayComponent::try_from_items(&items).unwrap(), Some(component));
    }
}
