// SPDX-License-Identifier: MIT OR Apache-2.0
//! Audio file component (`音声ファイル`).

use super::{field, marker_field, movable_constants, ComponentRecord};
use crate::converter::ValueType;
use crate::field::{ExoRecord, FieldTable};
use crate::movable::{decimal, MovableValue};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

movable_constants! {
    /// Playback start position in seconds
    pub struct PlaybackPosition {
        digits: 2,
        default: decimal(0, 2),
        min: decimal(0, 2),
        max: decimal(9_999_999, 2),
        min_slider: decimal(0, 2),
        max_slider: decimal(10_000, 2),
    }
}

movable_constants! {
    /// Playback speed in percent
    pub struct PlaybackSpeed {
        digits: 1,
        default: decimal(1000, 1),
        min: decimal(100, 1),
        max: decimal(8000, 1),
        min_slider: decimal(100, 1),
        max_slider: decimal(8000, 1),
    }
}

/// Audio file settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioComponent {
    /// Start position within the file
    pub position: MovableValue<PlaybackPosition>,
    /// Playback speed
    pub speed: MovableValue<PlaybackSpeed>,
    /// Loop playback
    pub looping: bool,
    /// Follow the linked video file
    pub sync_with_video: bool,
    /// Path of the audio file
    pub file: String,
}

impl AudioComponent {
    /// Create a component playing `file`
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }
}

static AUDIO_FIELDS: Lazy<FieldTable<AudioComponent>> = Lazy::new(|| {
    FieldTable::new(vec![
        marker_field(),
        field!(AudioComponent, "再生位置", 0, ValueType::movable::<PlaybackPosition>(), movable position),
        field!(AudioComponent, "再生速度", 1, ValueType::movable::<PlaybackSpeed>(), movable speed),
        field!(AudioComponent, "ループ再生", 2, ValueType::Bool, value looping),
        field!(AudioComponent, "動画ファイルと連携", 3, ValueType::Bool, value sync_with_video),
        field!(AudioComponent, "file", 4, ValueType::Text, text file),
    ])
});

impl ExoRecord for AudioComponent {
    fn field_table() -> &'static FieldTable<Self> {
        &AUDIO_FIELDS
    }
}

impl ComponentRecord for AudioComponent {
    const MARKER: &'static str = "音声ファイル";
}
