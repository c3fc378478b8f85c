// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text object component (`テキスト`).

use super::{exo_enum, field, marker_field, movable_constants, ComponentRecord};
use crate::color::Color;
use crate::converter::fixed_text::truncate_utf16;
use crate::converter::spacing::{SPACING_MAX, SPACING_MIN};
use crate::converter::{ConverterKind, ValueType};
use crate::field::{ExoRecord, FieldDescriptor, FieldTable};
use crate::movable::{decimal, MovableValue};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};

/// Longest text in UTF-16 code units
pub const MAX_TEXT_LEN: usize = 1023;

/// Font used by new text objects
pub const DEFAULT_FONT: &str = "MS UI Gothic";

movable_constants! {
    /// Font size in pixels
    pub struct FontSize {
        digits: 0,
        default: decimal(34, 0),
        min: decimal(1, 0),
        max: decimal(1000, 0),
        min_slider: decimal(1, 0),
        max_slider: decimal(256, 0),
    }
}

movable_constants! {
    /// Characters displayed per second; zero shows everything at once
    pub struct TextSpeed {
        digits: 1,
        default: decimal(0, 1),
        min: decimal(0, 1),
        max: decimal(8000, 1),
        min_slider: decimal(0, 1),
        max_slider: decimal(1000, 1),
    }
}

exo_enum! {
    /// Glyph decoration
    pub enum FontDecoration {
        /// Plain glyphs
        #[default]
        Normal = 0,
        /// Drop shadow
        Shadow = 1,
        /// Light drop shadow
        ShadowLight = 2,
        /// Outline
        Outline = 3,
        /// Thin outline
        OutlineThin = 4,
    }
}

exo_enum! {
    /// Anchor and writing direction of the text box
    pub enum TextAlignment {
        /// Horizontal, top left
        #[default]
        TopLeft = 0,
        /// Horizontal, top center
        TopCenter = 1,
        /// Horizontal, top right
        TopRight = 2,
        /// Horizontal, middle left
        MiddleLeft = 3,
        /// Horizontal, middle center
        MiddleCenter = 4,
        /// Horizontal, middle right
        MiddleRight = 5,
        /// Horizontal, bottom left
        BottomLeft = 6,
        /// Horizontal, bottom center
        BottomCenter = 7,
        /// Horizontal, bottom right
        BottomRight = 8,
        /// Vertical, right top
        VerticalRightTop = 9,
        /// Vertical, right middle
        VerticalRightMiddle = 10,
        /// Vertical, right bottom
        VerticalRightBottom = 11,
        /// Vertical, center top
        VerticalCenterTop = 12,
        /// Vertical, center middle
        VerticalCenterMiddle = 13,
        /// Vertical, center bottom
        VerticalCenterBottom = 14,
        /// Vertical, left top
        VerticalLeftTop = 15,
        /// Vertical, left middle
        VerticalLeftMiddle = 16,
        /// Vertical, left bottom
        VerticalLeftBottom = 17,
    }
}

/// Text object settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextComponent {
    /// Font size
    pub size: MovableValue<FontSize>,
    /// Display speed
    pub speed: MovableValue<TextSpeed>,
    /// Split into one object per character
    pub per_character: bool,
    /// Place characters along the motion path
    pub on_motion_path: bool,
    /// Scroll automatically
    pub auto_scroll: bool,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Glyph decoration
    pub decoration: FontDecoration,
    /// Adjust the box to the text
    pub auto_adjust: bool,
    /// Smooth glyph edges
    pub soft: bool,
    /// Fixed-pitch layout
    pub monospace: bool,
    /// Alignment
    pub alignment: TextAlignment,
    #[serde(deserialize_with = "deserialize_spacing")]
    spacing_x: i32,
    #[serde(deserialize_with = "deserialize_spacing")]
    spacing_y: i32,
    /// High-precision rendering
    pub precision: bool,
    /// Glyph color
    pub color: Color,
    /// Shadow or outline color
    pub decoration_color: Color,
    /// Font family
    pub font: String,
    #[serde(deserialize_with = "deserialize_text")]
    text: String,
}

impl Default for TextComponent {
    fn default() -> Self {
        Self {
            size: MovableValue::default(),
            speed: MovableValue::default(),
            per_character: false,
            on_motion_path: false,
            auto_scroll: false,
            bold: false,
            italic: false,
            decoration: FontDecoration::Normal,
            auto_adjust: false,
            soft: true,
            monospace: false,
            alignment: TextAlignment::TopLeft,
            spacing_x: 0,
            spacing_y: 0,
            precision: true,
            color: Color::WHITE,
            decoration_color: Color::BLACK,
            font: DEFAULT_FONT.to_string(),
            text: String::new(),
        }
    }
}

impl TextComponent {
    /// Create a text object showing `text`
    pub fn new(text: &str) -> Self {
        let mut component = Self::default();
        component.set_text(text);
        component
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the displayed text, cut to [`MAX_TEXT_LEN`] UTF-16 code units
    pub fn set_text(&mut self, text: &str) {
        let kept = truncate_utf16(text, MAX_TEXT_LEN);
        if kept.len() < text.len() {
            tracing::warn!(
                kept = kept.chars().count(),
                dropped = text[kept.len()..].chars().count(),
                "Text truncated"
            );
        }
        self.text = kept.to_string();
    }

    /// Horizontal character spacing
    pub fn spacing_x(&self) -> i32 {
        self.spacing_x
    }

    /// Set the horizontal character spacing, clamped to `-100..=100`
    pub fn set_spacing_x(&mut self, spacing: i32) {
        self.spacing_x = clamp_spacing(spacing);
    }

    /// Vertical line spacing
    pub fn spacing_y(&self) -> i32 {
        self.spacing_y
    }

    /// Set the vertical line spacing, clamped to `-100..=100`
    pub fn set_spacing_y(&mut self, spacing: i32) {
        self.spacing_y = clamp_spacing(spacing);
    }
}

fn clamp_spacing(spacing: i32) -> i32 {
    spacing.clamp(SPACING_MIN as i32, SPACING_MAX as i32)
}

fn deserialize_spacing<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    i32::deserialize(deserializer).map(clamp_spacing)
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(truncate_utf16(&text, MAX_TEXT_LEN).to_string())
}

static TEXT_FIELDS: Lazy<FieldTable<TextComponent>> = Lazy::new(|| {
    FieldTable::new(vec![
        marker_field(),
        field!(TextComponent, "サイズ", 0, ValueType::movable::<FontSize>(), movable size),
        field!(TextComponent, "表示速度", 1, ValueType::movable::<TextSpeed>(), movable speed),
        field!(TextComponent, "文字毎に個別オブジェクト", 2, ValueType::Bool, value per_character),
        field!(TextComponent, "移動座標上に表示する", 3, ValueType::Bool, value on_motion_path),
        field!(TextComponent, "自動スクロール", 4, ValueType::Bool, value auto_scroll),
        field!(TextComponent, "B", 5, ValueType::Bool, value bold),
        field!(TextComponent, "I", 6, ValueType::Bool, value italic),
        field!(TextComponent, "type", 7, ValueType::enumeration::<FontDecoration>(), enumeration decoration),
        field!(TextComponent, "autoadjust", 8, ValueType::Bool, value auto_adjust),
        field!(TextComponent, "soft", 9, ValueType::Bool, value soft),
        field!(TextComponent, "monospace", 10, ValueType::Bool, value monospace),
        field!(TextComponent, "align", 11, ValueType::enumeration::<TextAlignment>(), enumeration alignment),
        FieldDescriptor::new(
            "spacex",
            12,
            ValueType::Int,
            |text: &TextComponent| Some(text.spacing_x.into()),
            |text, value| {
                text.set_spacing_x(value.try_into()?);
                Ok(())
            },
        )
        .with_converter(ConverterKind::SignedSpacing),
        FieldDescriptor::new(
            "spacey",
            13,
            ValueType::Int,
            |text: &TextComponent| Some(text.spacing_y.into()),
            |text, value| {
                text.set_spacing_y(value.try_into()?);
                Ok(())
            },
        )
        .with_converter(ConverterKind::SignedSpacing),
        field!(TextComponent, "precision", 14, ValueType::Bool, value precision),
        field!(TextComponent, "color", 15, ValueType::Color, value color),
        field!(TextComponent, "color2", 16, ValueType::Color, value decoration_color),
        field!(TextComponent, "font", 17, ValueType::Text, text font),
        FieldDescriptor::new(
            "text",
            18,
            ValueType::Text,
            |text: &TextComponent| Some(text.text.clone().into()),
            |text, value| {
                text.set_text(&String::try_from(value)?);
                Ok(())
            },
        )
        .with_converter(ConverterKind::FixedWidthText { max_len: MAX_TEXT_LEN }),
    ])
});

impl ExoRecord for TextComponent {
    fn field_table() -> &'static FieldTable<Self> {
        &TEXT_FIELDS
    }
}

impl ComponentRecord for TextComponent {
    const MARKER: &'static str = "テキスト";
}
