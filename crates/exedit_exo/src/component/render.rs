// SPDX-License-Identifier: MIT OR Apache-2.0
//! Standard drawing filter (`標準描画`).

use super::{exo_enum, field, marker_field, movable_constants, ComponentRecord};
use crate::converter::ValueType;
use crate::field::{ExoRecord, FieldTable};
use crate::movable::{decimal, MovableValue};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

movable_constants! {
    /// Position along one axis in pixels
    pub struct Coordinate {
        digits: 1,
        default: decimal(0, 1),
        min: decimal(-999_999, 1),
        max: decimal(999_999, 1),
        min_slider: decimal(-20_000, 1),
        max_slider: decimal(20_000, 1),
    }
}

movable_constants! {
    /// Zoom in percent
    pub struct Zoom {
        digits: 2,
        default: decimal(10_000, 2),
        min: decimal(0, 2),
        max: decimal(500_000, 2),
        min_slider: decimal(0, 2),
        max_slider: decimal(80_000, 2),
    }
}

movable_constants! {
    /// Transparency in percent
    pub struct Transparency {
        digits: 1,
        default: decimal(0, 1),
        min: decimal(0, 1),
        max: decimal(1000, 1),
        min_slider: decimal(0, 1),
        max_slider: decimal(1000, 1),
    }
}

movable_constants! {
    /// Rotation in degrees
    pub struct Rotation {
        digits: 2,
        default: decimal(0, 2),
        min: decimal(-360_000, 2),
        max: decimal(360_000, 2),
        min_slider: decimal(-36_000, 2),
        max_slider: decimal(36_000, 2),
    }
}

exo_enum! {
    /// How the object is composited onto the frame
    pub enum BlendMode {
        /// Normal
        #[default]
        Normal = 0,
        /// Additive
        Add = 1,
        /// Subtractive
        Subtract = 2,
        /// Multiply
        Multiply = 3,
        /// Screen
        Screen = 4,
        /// Overlay
        Overlay = 5,
        /// Lighten
        Lighten = 6,
        /// Darken
        Darken = 7,
        /// Luminosity
        Luminosity = 8,
        /// Color difference
        ColorDifference = 9,
        /// Shadow
        Shadow = 10,
        /// Light and dark
        LightDark = 11,
        /// Difference
        Difference = 12,
    }
}

/// Standard drawing settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderComponent {
    /// Horizontal position
    pub x: MovableValue<Coordinate>,
    /// Vertical position
    pub y: MovableValue<Coordinate>,
    /// Depth
    pub z: MovableValue<Coordinate>,
    /// Zoom
    pub zoom: MovableValue<Zoom>,
    /// Transparency
    pub transparency: MovableValue<Transparency>,
    /// Rotation
    pub rotation: MovableValue<Rotation>,
    /// Blend mode
    pub blend: BlendMode,
}

static RENDER_FIELDS: Lazy<FieldTable<RenderComponent>> = Lazy::new(|| {
    FieldTable::new(vec![
        marker_field(),
        field!(RenderComponent, "X", 0, ValueType::movable::<Coordinate>(), movable x),
        field!(RenderComponent, "Y", 1, ValueType::movable::<Coordinate>(), movable y),
        field!(RenderComponent, "Z", 2, ValueType::movable::<Coordinate>(), movable z),
        field!(RenderComponent, "拡大率", 3, ValueType::movable::<Zoom>(), movable zoom),
        field!(RenderComponent, "透明度", 4, ValueType::movable::<Transparency>(), movable transparency),
        field!(RenderComponent, "回転", 5, ValueType::movable::<Rotation>(), movable rotation),
        field!(RenderComponent, "blend", 6, ValueType::enumeration::<BlendMode>(), enumeration blend),
    ])
});

impl ExoRecord for RenderComponent {
    fn field_table() -> &'static FieldTable<Self> {
        &RENDER_FIELDS
    }
}

impl ComponentRecord for RenderComponent {
    const MARKER: &'static str = "標準描画";
}
