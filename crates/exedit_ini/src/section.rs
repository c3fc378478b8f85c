// SPDX-License-Identifier: MIT OR Apache-2.0
//! Named sections of items and ordered section collections.

use crate::error::{IniError, Result};
use crate::item::{has_control_chars, ItemCollection, LINE_BREAK};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validate a section name
pub fn validate_section_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if has_control_chars(name) {
        "name contains control characters"
    } else {
        return Ok(());
    };

    Err(IniError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// A `[name]` header followed by its items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct Section {
    name: String,
    /// Items of this section
    pub items: ItemCollection,
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_items(name, ItemCollection::new())
    }

    /// Create a section holding `items`
    pub fn with_items(name: impl Into<String>, items: ItemCollection) -> Result<Self> {
        let name = name.into();
        validate_section_name(&name)?;
        Ok(Self { name, items })
    }

    /// Section name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)?;
        if !self.items.is_empty() {
            write!(f, "{LINE_BREAK}{}", self.items)?;
        }
        Ok(())
    }
}

/// Serialized shape of a section
#[derive(Serialize, Deserialize)]
struct RawSection {
    name: String,
    items: ItemCollection,
}

impl TryFrom<RawSection> for Section {
    type Error = IniError;

    fn try_from(raw: RawSection) -> Result<Self> {
        Self::with_items(raw.name, raw.items)
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        Self {
            name: section.name,
            items: section.items,
        }
    }
}

/// Ordered collection of sections with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionCollection {
    sections: IndexMap<String, Section>,
}

impl SectionCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            sections: IndexMap::new(),
        }
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate sections in order
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Iterate section names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Whether a section with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Get a section by name
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Get a mutable section by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Get a section by position
    pub fn get_index(&self, index: usize) -> Option<&Section> {
        self.sections.get_index(index).map(|(_, section)| section)
    }

    /// Get the last section
    pub fn last_mut(&mut self) -> Option<&mut Section> {
        self.sections.last_mut().map(|(_, section)| section)
    }

    /// Append a section; fails if the name is already present
    pub fn push(&mut self, section: Section) -> Result<()> {
        if self.sections.contains_key(section.name()) {
            return Err(IniError::DuplicateSection { name: section.name });
        }
        self.sections.insert(section.name.clone(), section);
        Ok(())
    }

    /// Insert a section at `index`; fails if the name is already present.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, section: Section) -> Result<()> {
        if self.sections.contains_key(section.name()) {
            return Err(IniError::DuplicateSection { name: section.name });
        }
        self.sections.shift_insert(index, section.name.clone(), section);
        Ok(())
    }

    /// Remove a section by name, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Append every section of `other`; stops at the first duplicate
    pub fn extend(&mut self, other: impl IntoIterator<Item = Section>) -> Result<()> {
        for section in other {
            self.push(section)?;
        }
        Ok(())
    }
}

impl fmt::Display for SectionCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, section) in self.sections.values().enumerate() {
            if index > 0 {
                f.write_str(LINE_BREAK)?;
            }
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Section>> for SectionCollection {
    type Error = IniError;

    fn try_from(sections: Vec<Section>) -> Result<Self> {
        let mut collection = Self::new();
        collection.extend(sections)?;
        Ok(collection)
    }
}

impl From<SectionCollection> for Vec<Section> {
    fn from(collection: SectionCollection) -> Self {
        collection.sections.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a SectionCollection {
    type Item = &'a Section;
    type IntoIter = indexmap::map::Values<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, items: &[(&str, &str)]) -> Section {
        let mut section = Section::new(name).unwrap();
        for (item_name, value) in items {
            section.items.push_new(*item_name, *value).unwrap();
        }
        section
    }

    #[test]
    fn test_section_name_validation() {
        assert!(Section::new("exedit").is_ok());
        assert!(Section::new("0.1").is_ok());
        assert!(Section::new("").is_err());
        assert!(Section::new("a\r\nb").is_err());
    }

    #[test]
    fn test_duplicate_sections_rejected() {
        let mut sections = SectionCollection::new();
        sections.push(Section::new("0").unwrap()).unwrap();
        let err = sections.push(Section::new("0").unwrap()).unwrap_err();
        assert_eq!(err, IniError::DuplicateSection { name: "0".into() });
        assert!(sections.insert(0, Section::new("0").unwrap()).is_err());
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_display() {
        let mut sections = SectionCollection::new();
        sections
            .push(section("exedit", &[("width", "1920"), ("height", "1080")]))
            .unwrap();
        sections.push(section("0", &[])).unwrap();
        sections.push(section("0.0", &[("_name", "標準描画")])).unwrap();

        assert_eq!(
            sections.to_string(),
            "[exedit]\r\nwidth=1920\r\nheight=1080\r\n[0]\r\n[0.0]\r\n_name=標準描画"
        );
    }

    #[test]
    fn test_insert_and_remove_keep_order() {
        let mut sections = SectionCollection::new();
        sections.push(section("a", &[])).unwrap();
        sections.push(section("c", &[])).unwrap();
        sections.insert(1, section("b", &[])).unwrap();
        assert_eq!(sections.names().collect::<Vec<_>>(), ["a", "b", "c"]);

        sections.remove("a");
        assert_eq!(sections.names().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(sections.get_index(0).unwrap().name(), "b");
    }
}
