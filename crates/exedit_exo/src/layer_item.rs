// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer items: timeline objects stored in `[N]` with components in `[N.M]`.

use crate::component::{field, Component};
use crate::converter::{FieldValue, ValueType};
use crate::error::{ExoError, Result};
use crate::field::{ExoRecord, FieldDescriptor, FieldTable};
use crate::marshal;
use exedit_ini::{Section, SectionCollection};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One timeline object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerItem {
    /// First frame, inclusive
    pub start: i32,
    /// Last frame, inclusive
    pub end: i32,
    /// Layer number
    pub layer: i32,
    /// Group id; zero or less means ungrouped
    pub group: i32,
    /// Composite onto the frame
    pub overlay: bool,
    /// Audio object; clipping and camera flags are not written for these
    pub audio: bool,
    /// Clip by the object on the layer above
    pub clipping: bool,
    /// Subject to camera control
    pub camera: bool,
    /// Index of the object this one is chained to; negative means none
    pub chain: i32,
    /// Components in section order
    pub components: Vec<Component>,
}

impl Default for LayerItem {
    fn default() -> Self {
        Self {
            start: 1,
            end: 1,
            layer: 1,
            group: 0,
            overlay: true,
            audio: false,
            clipping: false,
            camera: false,
            chain: -1,
            components: Vec::new(),
        }
    }
}

impl LayerItem {
    /// Create an item covering `start..=end` on `layer`
    pub fn new(start: i32, end: i32, layer: i32) -> Self {
        Self {
            start,
            end,
            layer,
            ..Self::default()
        }
    }

    /// Add a component
    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Section name of the item with this index
    pub fn section_name(index: usize) -> String {
        index.to_string()
    }

    /// Section name of one of its components
    pub fn component_section_name(index: usize, component: usize) -> String {
        format!("{index}.{component}")
    }

    /// Read item `index` and its components.
    ///
    /// Returns `Ok(None)` if there is no `[index]` section.
    pub fn from_sections(sections: &SectionCollection, index: usize) -> Result<Option<Self>> {
        let name = Self::section_name(index);
        let Some(section) = sections.get(&name) else {
            return Ok(None);
        };

        let mut item = Self::default();
        let count = marshal::from_items(&section.items, &mut item).map_err(|err| err.in_section(&name))?;
        if count == 0 {
            return Err(ExoError::UnrecognizedSection(name));
        }

        for component in 0.. {
            let component_name = Self::component_section_name(index, component);
            let Some(component_section) = sections.get(&component_name) else {
                break;
            };
            let component =
                Component::from_items(&component_section.items).map_err(|err| err.in_section(&component_name))?;
            item.components.push(component);
        }
        Ok(Some(item))
    }

    /// Write item `index` and its components, item section first
    pub fn to_sections(&self, index: usize) -> Result<Vec<Section>> {
        let name = Self::section_name(index);
        let items = marshal::to_items(self).map_err(|err| err.in_section(&name))?;

        let mut sections = Vec::with_capacity(self.components.len() + 1);
        sections.push(Section::with_items(name, items)?);
        for (position, component) in self.components.iter().enumerate() {
            let component_name = Self::component_section_name(index, position);
            let items = component
                .to_items()
                .map_err(|err| err.in_section(&component_name))?;
            sections.push(Section::with_items(component_name, items)?);
        }
        Ok(sections)
    }
}

fn flag(set: bool) -> Option<FieldValue> {
    set.then_some(FieldValue::Bool(true))
}

static LAYER_ITEM_FIELDS: Lazy<FieldTable<LayerItem>> = Lazy::new(|| {
    FieldTable::new(vec![
        field!(LayerItem, "start", 0, ValueType::Int, value start),
        field!(LayerItem, "end", 1, ValueType::Int, value end),
        field!(LayerItem, "layer", 2, ValueType::Int, value layer),
        FieldDescriptor::new(
            "group",
            3,
            ValueType::Int,
            |item: &LayerItem| (item.group > 0).then(|| item.group.into()),
            |item, value| {
                item.group = value.try_into()?;
                Ok(())
            },
        ),
        field!(LayerItem, "overlay", 4, ValueType::Bool, value overlay),
        FieldDescriptor::new(
            "audio",
            5,
            ValueType::Bool,
            |item: &LayerItem| flag(item.audio),
            |item, value| {
                item.audio = value.try_into()?;
                Ok(())
            },
        ),
        FieldDescriptor::new(
            "clipping",
            6,
            ValueType::Bool,
            |item: &LayerItem| flag(item.clipping && !item.audio),
            |item, value| {
                item.clipping = value.try_into()?;
                Ok(())
            },
        ),
        FieldDescriptor::new(
            "camera",
            7,
            ValueType::Bool,
            |item: &LayerItem| flag(item.camera && !item.audio),
            |item, value| {
                item.camera = value.try_into()?;
                Ok(())
            },
        ),
        FieldDescriptor::new(
            "chain",
            8,
            ValueType::Int,
            |item: &LayerItem| (item.chain >= 0).then(|| item.chain.into()),
            |item, value| {
                item.chain = value.try_into()?;
                Ok(())
            },
        ),
    ])
});

impl ExoRecord for LayerItem {
    fn field_table() -> &'static FieldTable<Self> {
        &LAYER_ITEM_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{PlayComponent, RenderComponent, TextComponent};
    use exedit_ini::parse;

    fn write(item: &LayerItem, index: usize) -> String {
        let mut sections = SectionCollection::new();
        sections.extend(item.to_sections(index).unwrap()).unwrap();
        sections.to_string()
    }

    #[test]
    fn test_plain_fields() {
        let item = LayerItem::new(1, 120, 2);
        assert_eq!(write(&item, 0), "[0]\r\nstart=1\r\nend=120\r\nlayer=2\r\noverlay=1");
    }

    #[test]
    fn test_conditional_fields() {
        let item = LayerItem {
            group: 3,
            clipping: true,
            camera: true,
            chain: 0,
            ..LayerItem::new(10, 20, 1)
        };
        assert_eq!(
            write(&item, 4),
            "[4]\r\nstart=10\r\nend=20\r\nlayer=1\r\ngroup=3\r\noverlay=1\r\nclipping=1\r\ncamera=1\r\nchain=0"
        );
    }

    #[test]
    fn test_audio_suppresses_clipping_and_camera() {
        let item = LayerItem {
            audio: true,
            clipping: true,
            camera: true,
            ..LayerItem::new(1, 30, 5)
        };
        assert_eq!(
            write(&item, 0),
            "[0]\r\nstart=1\r\nend=30\r\nlayer=5\r\noverlay=1\r\naudio=1"
        );
    }

    #[test]
    fn test_round_trip_with_components() {
        let item = LayerItem::new(1, 90, 3)
            .with_component(TextComponent::new("こんにちは"))
            .with_component(RenderComponent::default());
        let sections = parse(&write(&item, 7)).unwrap();
        let names: Vec<_> = sections.names().collect();
        assert_eq!(names, ["7", "7.0", "7.1"]);

        let loaded = LayerItem::from_sections(&sections, 7).unwrap().unwrap();
        assert_eq!(loaded, item);
    }

    #[test]
    fn test_component_scan_stops_at_gap() {
        let text = "[0]\r\nstart=1\r\nend=2\r\nlayer=1\r\n\
                    [0.0]\r\n_name=標準再生\r\n\
                    [0.2]\r\n_name=音声ファイル";
        let sections = parse(text).unwrap();
        let loaded = LayerItem::from_sections(&sections, 0).unwrap().unwrap();
        assert_eq!(loaded.components, vec![Component::from(PlayComponent::default())]);
    }

    #[test]
    fn test_missing_and_unrecognized_sections() {
        let sections = parse("[0]\r\nfoo=bar").unwrap();
        assert_eq!(LayerItem::from_sections(&sections, 1).unwrap(), None);
        assert_eq!(
            LayerItem::from_sections(&sections, 0).unwrap_err(),
            ExoError::UnrecognizedSection("0".into())
        );
    }

    #[test]
    fn test_errors_name_the_section() {
        let text = "[0]\r\nstart=1\r\n[0.0]\r\n_name=音声ファイル\r\n再生速度=fast";
        let sections = parse(text).unwrap();
        let err = LayerItem::from_sections(&sections, 0).unwrap_err();
        assert_eq!(
            err,
            ExoError::Conversion {
                item: "再生速度".into(),
                text: "fast".into()
            }
            .in_section("0.0")
        );
        assert!(err.to_string().contains("[0.0]"));
    }
}
