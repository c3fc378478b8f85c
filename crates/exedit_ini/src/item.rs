// SPDX-License-Identifier: MIT OR Apache-2.0
//! Items (`name=value` lines) and ordered, name-unique item collections.

use crate::error::{IniError, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line separator used when writing
pub const LINE_BREAK: &str = "\r\n";

/// Check a string for control characters (covers CR and LF)
pub(crate) fn has_control_chars(s: &str) -> bool {
    s.chars().any(char::is_control)
}

/// Validate an item name.
///
/// Beyond the basic rules (non-empty, no control characters) an item name must
/// survive a write/parse round trip: the parser trims names, splits at the
/// first `=`, treats `;` lines as comments and `[...]` lines as headers.
pub fn validate_item_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if has_control_chars(name) {
        "name contains control characters"
    } else if name.contains('=') {
        "name contains '='"
    } else if name.starts_with(';') {
        "name starts with ';'"
    } else if name.starts_with('[') {
        "name starts with '['"
    } else if name.trim() != name {
        "name has leading or trailing whitespace"
    } else {
        return Ok(());
    };

    Err(IniError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Validate an item value for the item called `name`.
///
/// The parser trims values on the left, so leading whitespace is rejected
/// along with control characters.
pub fn validate_item_value(name: &str, value: &str) -> Result<()> {
    let reason = if has_control_chars(value) {
        "value contains control characters"
    } else if value.trim_start() != value {
        "value has leading whitespace"
    } else {
        return Ok(());
    };

    Err(IniError::InvalidValue {
        name: name.to_string(),
        reason,
    })
}

/// A single `name=value` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct Item {
    name: String,
    value: String,
}

impl Item {
    /// Create a new item, validating both name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        validate_item_name(&name)?;
        validate_item_value(&name, &value)?;
        Ok(Self { name, value })
    }

    /// Create an item with an empty value
    pub fn empty(name: impl Into<String>) -> Result<Self> {
        Self::new(name, String::new())
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        validate_item_value(&self.name, &value)?;
        self.value = value;
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl TryFrom<(String, String)> for Item {
    type Error = IniError;

    fn try_from((name, value): (String, String)) -> Result<Self> {
        Self::new(name, value)
    }
}

impl From<Item> for (String, String) {
    fn from(item: Item) -> Self {
        (item.name, item.value)
    }
}

/// Ordered collection of items with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct ItemCollection {
    items: IndexMap<String, Item>,
}

impl ItemCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Iterate item names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Whether an item with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Get an item by name
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Get a mutable item by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.get_mut(name)
    }

    /// Get an item by position
    pub fn get_index(&self, index: usize) -> Option<&Item> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    /// Get the value of the item with this name
    pub fn value(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(Item::value)
    }

    /// Position of the item with this name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items.get_index_of(name)
    }

    /// Append an item; fails if the name is already present
    pub fn push(&mut self, item: Item) -> Result<()> {
        if self.items.contains_key(item.name()) {
            return Err(IniError::DuplicateItem {
                section: None,
                name: item.name,
            });
        }
        self.items.insert(item.name.clone(), item);
        Ok(())
    }

    /// Build and append an item in one step
    pub fn push_new(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.push(Item::new(name, value)?)
    }

    /// Insert an item at `index`; fails if the name is already present.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: Item) -> Result<()> {
        if self.items.contains_key(item.name()) {
            return Err(IniError::DuplicateItem {
                section: None,
                name: item.name,
            });
        }
        self.items.shift_insert(index, item.name.clone(), item);
        Ok(())
    }

    /// Overwrite the item at `index`.
    ///
    /// The new item may keep the old name; any other name already present
    /// elsewhere in the collection is rejected. Returns the replaced item, or
    /// `None` (leaving the collection untouched) if `index` is out of range.
    pub fn replace(&mut self, index: usize, item: Item) -> Result<Option<Item>> {
        let Some(current) = self.items.get_index(index).map(|(name, _)| name.clone()) else {
            return Ok(None);
        };
        if current != item.name() && self.items.contains_key(item.name()) {
            return Err(IniError::DuplicateItem {
                section: None,
                name: item.name,
            });
        }

        let old = self.items.shift_remove_index(index).map(|(_, old)| old);
        self.items.shift_insert(index, item.name.clone(), item);
        Ok(old)
    }

    /// Remove an item by name, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        self.items.shift_remove(name)
    }

    /// Look up an item by name, appending an empty one if it is missing
    pub fn get_or_insert_empty(&mut self, name: &str) -> Result<&mut Item> {
        match self.items.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let item = Item::empty(name)?;
                Ok(entry.insert(item))
            }
        }
    }

    /// Remove all items
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Display for ItemCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.items.values().enumerate() {
            if index > 0 {
                f.write_str(LINE_BREAK)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Item>> for ItemCollection {
    type Error = IniError;

    fn try_from(items: Vec<Item>) -> Result<Self> {
        let mut collection = Self::new();
        for item in items {
            collection.push(item)?;
        }
        Ok(collection)
    }
}

impl From<ItemCollection> for Vec<Item> {
    fn from(collection: ItemCollection) -> Self {
        collection.items.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a Item;
    type IntoIter = indexmap::map::Values<'a, String, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}
