// SPDX-License-Identifier: MIT OR Apache-2.0
//! Components: typed field bags stored in `[N.M]` sections.
//!
//! Every component section starts with a `_name` item naming its kind.
//! Reading tries the known kinds in a fixed order and keeps anything else as
//! [`Component::Unknown`] with its items untouched, so unknown filters and
//! plugins survive a read/write cycle.

pub mod audio;
pub mod play;
pub mod render;
pub mod text;

pub use audio::AudioComponent;
pub use play::PlayComponent;
pub use render::{BlendMode, RenderComponent};
pub use text::{FontDecoration, TextAlignment, TextComponent};

use crate::converter::{FieldValue, ValueMismatch, ValueType};
use crate::error::Result;
use crate::field::{ExoRecord, FieldDescriptor};
use crate::marshal;
use exedit_ini::ItemCollection;
use serde::{Deserialize, Serialize};

/// Name of the item identifying a component's kind
pub const MARKER_ITEM_NAME: &str = "_name";

/// Sort key placing the marker before every other field
const MARKER_ORDER: i32 = i32::MIN;

/// Declares an integer-backed enumeration stored by its raw value
macro_rules! exo_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $raw:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($(#[$variant_meta])* $variant = $raw,)+
        }

        impl $name {
            /// Every member in raw-value order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::converter::ExoEnum for $name {
            fn from_raw(raw: i64) -> Option<Self> {
                match raw {
                    $($raw => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn raw(self) -> i64 {
                self as i64
            }
        }
    };
}

/// Declares a [`MovableConstants`](crate::movable::MovableConstants) marker type
macro_rules! movable_constants {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            digits: $digits:literal,
            default: $default:expr,
            min: $min:expr,
            max: $max:expr,
            min_slider: $min_slider:expr,
            max_slider: $max_slider:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl $crate::movable::MovableConstants for $name {
            const DIGITS: u32 = $digits;
            const DEFAULT: rust_decimal::Decimal = $default;
            const MIN: rust_decimal::Decimal = $min;
            const MAX: rust_decimal::Decimal = $max;
            const MIN_SLIDER: rust_decimal::Decimal = $min_slider;
            const MAX_SLIDER: rust_decimal::Decimal = $max_slider;
        }
    };
}

/// Descriptor for a plain property of a record.
///
/// `value` copies the property, `text` clones it, `enumeration` stores the
/// raw member value and `movable` goes through [`MovableParts`](crate::movable::MovableParts).
macro_rules! field {
    ($record:ty, $name:literal, $order:literal, $value_type:expr, value $prop:ident) => {
        $crate::field::FieldDescriptor::new(
            $name,
            $order,
            $value_type,
            |record: &$record| Some(record.$prop.into()),
            |record: &mut $record, value| {
                record.$prop = value.try_into()?;
                Ok(())
            },
        )
    };
    ($record:ty, $name:literal, $order:literal, $value_type:expr, text $prop:ident) => {
        $crate::field::FieldDescriptor::new(
            $name,
            $order,
            $value_type,
            |record: &$record| Some(record.$prop.clone().into()),
            |record: &mut $record, value| {
                record.$prop = value.try_into()?;
                Ok(())
            },
        )
    };
    ($record:ty, $name:literal, $order:literal, $value_type:expr, enumeration $prop:ident) => {
        $crate::field::FieldDescriptor::new(
            $name,
            $order,
            $value_type,
            |record: &$record| Some($crate::converter::FieldValue::from_enum(record.$prop)),
            |record: &mut $record, value| {
                record.$prop = value.into_enum()?;
                Ok(())
            },
        )
    };
    ($record:ty, $name:literal, $order:literal, $value_type:expr, movable $prop:ident) => {
        $crate::field::FieldDescriptor::new(
            $name,
            $order,
            $value_type,
            |record: &$record| Some(record.$prop.into()),
            |record: &mut $record, value| {
                record.$prop = value.into_movable()?;
                Ok(())
            },
        )
    };
}

pub(crate) use exo_enum;
pub(crate) use field;
pub(crate) use movable_constants;

/// A record stored in a component section
pub trait ComponentRecord: ExoRecord + Default {
    /// Value of the `_name` item for this kind
    const MARKER: &'static str;

    /// Read a component of this kind.
    ///
    /// Returns `Ok(None)` when the first item is not this kind's marker.
    fn try_from_items(items: &ItemCollection) -> Result<Option<Self>> {
        let Some(first) = items.get_index(0) else {
            return Ok(None);
        };
        if first.name() != MARKER_ITEM_NAME || first.value() != Self::MARKER {
            return Ok(None);
        }

        let mut component = Self::default();
        marshal::from_items(items, &mut component)?;
        Ok(Some(component))
    }

    /// Write this component, marker first
    fn to_items(&self) -> Result<ItemCollection> {
        marshal::to_items(self)
    }
}

/// Descriptor for the `_name` marker of `T`; include it in every component table
pub(crate) fn marker_field<T: ComponentRecord>() -> FieldDescriptor<T> {
    FieldDescriptor::new(
        MARKER_ITEM_NAME,
        MARKER_ORDER,
        ValueType::Text,
        marker_value::<T>,
        accept_marker::<T>,
    )
}

fn marker_value<T: ComponentRecord>(_: &T) -> Option<FieldValue> {
    Some(FieldValue::Text(T::MARKER.to_string()))
}

fn accept_marker<T: ComponentRecord>(_: &mut T, value: FieldValue) -> std::result::Result<(), ValueMismatch> {
    if String::try_from(value)? != T::MARKER {
        return Err(ValueMismatch);
    }
    Ok(())
}

/// One component of a layer item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    /// Text object
    Text(TextComponent),
    /// Audio file
    Audio(AudioComponent),
    /// Standard drawing filter
    Render(RenderComponent),
    /// Standard playback filter
    Play(PlayComponent),
    /// Unrecognized kind, kept as raw items
    Unknown(ItemCollection),
}

impl Component {
    /// Read a component, trying each known kind in turn
    pub fn from_items(items: &ItemCollection) -> Result<Self> {
        if let Some(text) = TextComponent::try_from_items(items)? {
            return Ok(Self::Text(text));
        }
        if let Some(audio) = AudioComponent::try_from_items(items)? {
            return Ok(Self::Audio(audio));
        }
        if let Some(render) = RenderComponent::try_from_items(items)? {
            return Ok(Self::Render(render));
        }
        if let Some(play) = PlayComponent::try_from_items(items)? {
            return Ok(Self::Play(play));
        }

        tracing::trace!(marker = ?items.value(MARKER_ITEM_NAME), "Keeping unknown component");
        Ok(Self::Unknown(items.clone()))
    }

    /// Write this component
    pub fn to_items(&self) -> Result<ItemCollection> {
        match self {
            Self::Text(text) => text.to_items(),
            Self::Audio(audio) => audio.to_items(),
            Self::Render(render) => render.to_items(),
            Self::Play(play) => play.to_items(),
            Self::Unknown(items) => Ok(items.clone()),
        }
    }

    /// The kind marker, if the component has one
    pub fn marker(&self) -> Option<&str> {
        match self {
            Self::Text(_) => Some(TextComponent::MARKER),
            Self::Audio(_) => Some(AudioComponent::MARKER),
            Self::Render(_) => Some(RenderComponent::MARKER),
            Self::Play(_) => Some(PlayComponent::MARKER),
            Self::Unknown(items) => items.value(MARKER_ITEM_NAME),
        }
    }

    /// Short kind name for summaries
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Audio(_) => "audio",
            Self::Render(_) => "render",
            Self::Play(_) => "play",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<TextComponent> for Component {
    fn from(component: TextComponent) -> Self {
        Self::Text(component)
    }
}

impl From<AudioComponent> for Component {
    fn from(component: AudioComponent) -> Self {
        Self::Audio(component)
    }
}

impl From<RenderComponent> for Component {
    fn from(component: RenderComponent) -> Self {
        Self::Render(component)
    }
}

impl From<PlayComponent> for Component {
    fn from(component: PlayComponent) -> Self {
        Self::Play(component)
    }
}
