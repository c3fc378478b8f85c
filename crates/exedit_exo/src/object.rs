// SPDX-License-Identifier: MIT OR Apache-2.0
//! The whole-file project object.

use crate::component::field;
use crate::converter::ValueType;
use crate::error::{ExoError, Result};
use crate::field::{ExoRecord, FieldTable};
use crate::layer_item::LayerItem;
use crate::marshal;
use exedit_ini::{ParseMode, Section, SectionCollection};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of the global header section
pub const EXEDIT_SECTION: &str = "exedit";

/// Options for reading and writing project files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// How the line parser treats stray lines
    pub parse_mode: ParseMode,
    /// Process layer items on the rayon thread pool
    pub parallel: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Lenient,
            parallel: true,
        }
    }
}

/// A project file: global settings and the timeline objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExEditObject {
    /// Canvas width in pixels
    pub width: i32,
    /// Canvas height in pixels
    pub height: i32,
    /// Frame rate numerator
    pub rate: i32,
    /// Frame rate denominator
    pub scale: i32,
    /// Length in frames
    pub length: i32,
    /// Audio sample rate in Hz
    pub audio_rate: i32,
    /// Audio channel count
    pub audio_ch: i32,
    /// Timeline objects in section order
    pub layer_items: Vec<LayerItem>,
}

impl Default for ExEditObject {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            rate: 30,
            scale: 1,
            length: 1,
            audio_rate: 44100,
            audio_ch: 2,
            layer_items: Vec::new(),
        }
    }
}

impl ExEditObject {
    /// Parse project text
    pub fn parse(text: &str, options: &CodecOptions) -> Result<Self> {
        let sections = exedit_ini::parse_with(text, options.parse_mode)?;
        Self::from_sections_with(&sections, options)
    }

    /// Build from parsed sections with default options
    pub fn from_sections(sections: &SectionCollection) -> Result<Self> {
        Self::from_sections_with(sections, &CodecOptions::default())
    }

    /// Build from parsed sections.
    ///
    /// Layer items are read from `[0]`, `[1]`, ... up to the first missing
    /// index. The result does not depend on `options.parallel`.
    pub fn from_sections_with(sections: &SectionCollection, options: &CodecOptions) -> Result<Self> {
        let header = sections
            .get(EXEDIT_SECTION)
            .ok_or_else(|| ExoError::MissingSection(EXEDIT_SECTION.to_string()))?;

        let mut object = Self::default();
        marshal::from_items(&header.items, &mut object).map_err(|err| err.in_section(EXEDIT_SECTION))?;

        let count = (0..)
            .take_while(|index| sections.contains(&LayerItem::section_name(*index)))
            .count();
        let read = |index: usize| LayerItem::from_sections(sections, index);
        let layer_items: Vec<Option<LayerItem>> = if options.parallel {
            (0..count).into_par_iter().map(read).collect::<Result<_>>()?
        } else {
            (0..count).map(read).collect::<Result<_>>()?
        };
        object.layer_items = layer_items.into_iter().flatten().collect();

        tracing::debug!(
            layer_items = object.layer_items.len(),
            sections = sections.len(),
            parallel = options.parallel,
            "Read exedit object"
        );
        Ok(object)
    }

    /// Convert to sections with default options
    pub fn to_sections(&self) -> Result<SectionCollection> {
        self.to_sections_with(&CodecOptions::default())
    }

    /// Convert to sections: the header, then each layer item followed by its components
    pub fn to_sections_with(&self, options: &CodecOptions) -> Result<SectionCollection> {
        let header = marshal::to_items(self).map_err(|err| err.in_section(EXEDIT_SECTION))?;
        let mut sections = SectionCollection::new();
        sections.push(Section::with_items(EXEDIT_SECTION, header)?)?;

        let write = |(index, item): (usize, &LayerItem)| item.to_sections(index);
        let rendered: Vec<Vec<Section>> = if options.parallel {
            self.layer_items.par_iter().enumerate().map(write).collect::<Result<_>>()?
        } else {
            self.layer_items.iter().enumerate().map(write).collect::<Result<_>>()?
        };
        sections.extend(rendered.into_iter().flatten())?;
        Ok(sections)
    }

    /// Write project text with CRLF line breaks
    pub fn to_exo_string(&self) -> Result<String> {
        self.to_exo_string_with(&CodecOptions::default())
    }

    /// [`to_exo_string`](Self::to_exo_string) with explicit options
    pub fn to_exo_string_with(&self, options: &CodecOptions) -> Result<String> {
        Ok(self.to_sections_with(options)?.to_string())
    }

    /// Frames per second, `None` if `scale` is zero
    pub fn frame_rate(&self) -> Option<Decimal> {
        Decimal::from(self.rate).checked_div(Decimal::from(self.scale))
    }
}

static EXEDIT_FIELDS: Lazy<FieldTable<ExEditObject>> = Lazy::new(|| {
    FieldTable::new(vec![
        field!(ExEditObject, "width", 0, ValueType::Int, value width),
        field!(ExEditObject, "height", 1, ValueType::Int, value height),
        field!(ExEditObject, "rate", 2, ValueType::Int, value rate),
        field!(ExEditObject, "scale", 3, ValueType::Int, value scale),
        field!(ExEditObject, "length", 4, ValueType::Int, value length),
        field!(ExEditObject, "audio_rate", 5, ValueType::Int, value audio_rate),
        field!(ExEditObject, "audio_ch", 6, ValueType::Int, value audio_ch),
    ])
});

impl ExoRecord for ExEditObject {
    fn field_table() -> &'static FieldTable<Self> {
        &EXEDIT_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{AudioComponent, Component, PlayComponent, RenderComponent, TextComponent};
    use crate::movable::{decimal, MovableValue, MoveMode};
    use exedit_ini::IniError;

    const SAMPLE: &str = "[exedit]\r\nwidth=1920\r\nheight=1080\r\nrate=30\r\nscale=1\r\nlength=300\r\naudio_rate=44100\r\naudio_ch=2\r\n\
        [0]\r\nstart=1\r\nend=150\r\nlayer=1\r\noverlay=1\r\ncamera=1\r\n\
        [0.0]\r\n_name=図形\r\nサイズ=100\r\n縦横比=0.0\r\nライン幅=4000\r\ntype=1\r\ncolor=ffffff\r\nname=\r\n\
        [0.1]\r\n_name=標準描画\r\nX=0.0\r\nY=0.0\r\nZ=0.0\r\n拡大率=100.00\r\n透明度=0.0\r\n回転=0.00\r\nblend=0\r\n\
        [1]\r\nstart=1\r\nend=300\r\nlayer=2\r\ngroup=1\r\noverlay=1\r\naudio=1\r\n\
        [1.0]\r\n_name=音声ファイル\r\n再生位置=0.00\r\n再生速度=100.0\r\nループ再生=0\r\n動画ファイルと連携=0\r\nfile=C:\\a.wav\r\n\
        [1.1]\r\n_name=標準再生\r\n音量=100.0,0.0,1\r\n左右=0.0";

    fn sample_object(items: usize) -> ExEditObject {
        let layer_items = (0..items)
            .map(|index| {
                let index = index as i32;
                LayerItem {
                    group: index % 3,
                    chain: if index % 4 == 0 { index / 4 } else { -1 },
                    ..LayerItem::new(index * 10 + 1, index * 10 + 9, index % 100 + 1)
                }
                .with_component(TextComponent::new(&format!("line {index}")))
                .with_component(RenderComponent {
                    x: MovableValue::animated(decimal(i64::from(index), 0), decimal(0, 0), MoveMode::Curve),
                    ..RenderComponent::default()
                })
            })
            .collect();
        ExEditObject {
            length: 1000,
            layer_items,
            ..ExEditObject::default()
        }
    }

    #[test]
    fn test_parse_sample() {
        let object = ExEditObject::parse(SAMPLE, &CodecOptions::default()).unwrap();
        assert_eq!(object.width, 1920);
        assert_eq!(object.length, 300);
        assert_eq!(object.layer_items.len(), 2);

        let first = &object.layer_items[0];
        assert!(first.camera);
        let kinds: Vec<_> = first.components.iter().map(Component::kind_name).collect();
        assert_eq!(kinds, ["unknown", "render"]);

        let second = &object.layer_items[1];
        assert!(second.audio);
        assert_eq!(second.group, 1);
        let Component::Play(play) = &second.components[1] else {
            panic!("expected play component");
        };
        assert!(play.volume.is_animated());
    }

    #[test]
    fn test_canonical_text_round_trips() {
        let object = ExEditObject::parse(SAMPLE, &CodecOptions::default()).unwrap();
        assert_eq!(object.to_exo_string().unwrap(), SAMPLE);
    }

    #[test]
    fn test_object_round_trips() {
        let object = sample_object(12);
        let text = object.to_exo_string().unwrap();
        let loaded = ExEditObject::parse(&text, &CodecOptions::default()).unwrap();
        assert_eq!(loaded, object);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = CodecOptions {
            parallel: false,
            ..CodecOptions::default()
        };
        let parallel = CodecOptions::default();
        let object = sample_object(64);

        let text = object.to_exo_string_with(&parallel).unwrap();
        assert_eq!(text, object.to_exo_string_with(&sequential).unwrap());

        let sections = exedit_ini::parse(&text).unwrap();
        let from_parallel = ExEditObject::from_sections_with(&sections, &parallel).unwrap();
        let from_sequential = ExEditObject::from_sections_with(&sections, &sequential).unwrap();
        assert_eq!(from_parallel, from_sequential);
        assert_eq!(from_parallel, object);
    }

    #[test]
    fn test_section_order() {
        let object = ExEditObject {
            layer_items: vec![
                LayerItem::new(1, 10, 1).with_component(PlayComponent::default()),
                LayerItem::new(1, 10, 2)
                    .with_component(AudioComponent::new("a.wav"))
                    .with_component(PlayComponent::default()),
            ],
            ..ExEditObject::default()
        };
        let sections = object.to_sections().unwrap();
        let names: Vec<_> = sections.names().collect();
        assert_eq!(names, ["exedit", "0", "0.0", "1", "1.0", "1.1"]);
    }

    #[test]
    fn test_missing_header() {
        let err = ExEditObject::parse("[0]\r\nstart=1", &CodecOptions::default()).unwrap_err();
        assert_eq!(err, ExoError::MissingSection("exedit".into()));
    }

    #[test]
    fn test_layer_scan_stops_at_gap() {
        let text = "[exedit]\r\nwidth=640\r\n[0]\r\nstart=1\r\n[2]\r\nstart=5";
        let object = ExEditObject::parse(text, &CodecOptions::default()).unwrap();
        assert_eq!(object.layer_items.len(), 1);
        assert_eq!(object.height, 720);
    }

    #[test]
    fn test_parse_modes() {
        let text = "[exedit]\r\nwidth=640\r\nnot an item\r\n";
        assert!(ExEditObject::parse(text, &CodecOptions::default()).is_ok());

        let strict = CodecOptions {
            parse_mode: ParseMode::Strict,
            ..CodecOptions::default()
        };
        let err = ExEditObject::parse(text, &strict).unwrap_err();
        assert!(matches!(err, ExoError::Ini(IniError::MissingSeparator { line: 3, .. })));
    }

    #[test]
    fn test_header_errors_name_the_section() {
        let err = ExEditObject::parse("[exedit]\r\nwidth=wide", &CodecOptions::default()).unwrap_err();
        let ExoError::Section { section, .. } = &err else {
            panic!("expected section context, got {err:?}");
        };
        assert_eq!(section, "exedit");
    }

    #[test]
    fn test_frame_rate() {
        let object = ExEditObject {
            rate: 30000,
            scale: 1001,
            ..ExEditObject::default()
        };
        assert_eq!(object.frame_rate().unwrap().round_dp(3), decimal(29_970, 3));

        let object = ExEditObject {
            scale: 0,
            ..ExEditObject::default()
        };
        assert_eq!(object.frame_rate(), None);
    }

    #[test]
    fn test_options_from_ron() {
        let options: CodecOptions = ron::from_str("(parallel: false)").unwrap();
        assert_eq!(options.parse_mode, ParseMode::Lenient);
        assert!(!options.parallel);

        let options: CodecOptions = ron::from_str("(parse_mode: Strict)").unwrap();
        assert_eq!(options.parse_mode, ParseMode::Strict);
        assert!(options.parallel);
    }
}
