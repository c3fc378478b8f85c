// SPDX-License-Identifier: MIT OR Apache-2.0
//! Field marshalling between records and item collections.

use crate::converter::ConverterRegistry;
use crate::error::{ExoError, Result};
use crate::field::ExoRecord;
use exedit_ini::ItemCollection;

/// Write every field of `record` in field order.
///
/// Fields whose getter yields nothing are left out. A value its converter
/// cannot represent is an error.
pub fn to_items<T: ExoRecord>(record: &T) -> Result<ItemCollection> {
    to_items_with(record, ConverterRegistry::global())
}

/// [`to_items`] with an explicit converter registry
pub fn to_items_with<T: ExoRecord>(record: &T, registry: &ConverterRegistry) -> Result<ItemCollection> {
    let mut items = ItemCollection::new();
    for field in T::field_table().iter() {
        let Some(value) = (field.get)(record) else {
            tracing::trace!(item = field.item_name, "Field omitted");
            continue;
        };

        let converter = registry.resolve(field.converter);
        let text = converter
            .to_text(&value, field.value_type)?
            .ok_or_else(|| ExoError::Unwritable {
                item: field.item_name.to_string(),
            })?;
        items.push_new(field.item_name, text)?;
    }
    Ok(items)
}

/// Assign every field of `target` that has an item in `items`.
///
/// Absent items leave the property untouched; a present item that does not
/// convert is an error. Returns the number of fields set.
pub fn from_items<T: ExoRecord>(items: &ItemCollection, target: &mut T) -> Result<usize> {
    from_items_with(items, target, ConverterRegistry::global())
}

/// [`from_items`] with an explicit converter registry
pub fn from_items_with<T: ExoRecord>(
    items: &ItemCollection,
    target: &mut T,
    registry: &ConverterRegistry,
) -> Result<usize> {
    let mut count = 0;
    for field in T::field_table().iter() {
        let Some(text) = items.value(field.item_name) else {
            continue;
        };

        let conversion_error = || ExoError::Conversion {
            item: field.item_name.to_string(),
            text: text.to_string(),
        };
        let converter = registry.resolve(field.converter);
        let value = converter
            .from_text(text, field.value_type)?
            .ok_or_else(conversion_error)?;
        (field.set)(target, value).map_err(|_| conversion_error())?;
        count += 1;
    }
    tracing::trace!(fields = count, "Fields read");
    Ok(count)
}
