// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static field descriptor tables.
//!
//! Every record type that maps onto a section lists its fields once, in a
//! [`FieldTable`] built lazily on first use. A descriptor names the item,
//! fixes its position in the output, declares the value type, picks the
//! converter, and supplies plain function pointers to read and write the
//! backing property.

use crate::converter::{ConverterKind, FieldValue, ValueMismatch, ValueType};
use std::fmt;

/// Reads a property; `None` leaves the item out of the output
pub type FieldGetter<T> = fn(&T) -> Option<FieldValue>;

/// Writes a property from a converted value
pub type FieldSetter<T> = fn(&mut T, FieldValue) -> Result<(), ValueMismatch>;

/// One marshalled property of `T`
pub struct FieldDescriptor<T> {
    /// Item name in the section
    pub item_name: &'static str,
    /// Sort key; ties keep declaration order
    pub order: i32,
    /// Declared value type
    pub value_type: ValueType,
    /// Converter used for this field
    pub converter: ConverterKind,
    /// Property getter
    pub get: FieldGetter<T>,
    /// Property setter
    pub set: FieldSetter<T>,
}

impl<T> FieldDescriptor<T> {
    /// Create a descriptor using the default converter
    pub fn new(
        item_name: &'static str,
        order: i32,
        value_type: ValueType,
        get: FieldGetter<T>,
        set: FieldSetter<T>,
    ) -> Self {
        Self {
            item_name,
            order,
            value_type,
            converter: ConverterKind::Default,
            get,
            set,
        }
    }

    /// Use a specialized converter
    pub fn with_converter(mut self, converter: ConverterKind) -> Self {
        self.converter = converter;
        self
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("item_name", &self.item_name)
            .field("order", &self.order)
            .field("value_type", &self.value_type.name())
            .field("converter", &self.converter)
            .finish()
    }
}

/// Descriptors of one record type, sorted by order
pub struct FieldTable<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> FieldTable<T> {
    /// Build a table; descriptors with equal order keep their relative position
    pub fn new(mut fields: Vec<FieldDescriptor<T>>) -> Self {
        fields.sort_by_key(|field| field.order);
        Self { fields }
    }

    /// Descriptors in output order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter()
    }

    /// Descriptor for an item name
    pub fn get(&self, item_name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.item_name == item_name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// A type that marshals to and from a section's items
pub trait ExoRecord: Sized + 'static {
    /// The type's field table
    fn field_table() -> &'static FieldTable<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        a: i32,
        b: bool,
    }

    fn get_a(sample: &Sample) -> Option<FieldValue> {
        Some(sample.a.into())
    }

    fn set_a(sample: &mut Sample, value: FieldValue) -> Result<(), ValueMismatch> {
        sample.a = value.try_into()?;
        Ok(())
    }

    fn get_b(sample: &Sample) -> Option<FieldValue> {
        Some(sample.b.into())
    }

    fn set_b(sample: &mut Sample, value: FieldValue) -> Result<(), ValueMismatch> {
        sample.b = value.try_into()?;
        Ok(())
    }

    #[test]
    fn test_table_sorted_stably() {
        let table = FieldTable::new(vec![
            FieldDescriptor::new("late", 5, ValueType::Int, get_a, set_a),
            FieldDescriptor::new("first", 1, ValueType::Bool, get_b, set_b),
            FieldDescriptor::new("second", 1, ValueType::Int, get_a, set_a),
            FieldDescriptor::new("early", -3, ValueType::Int, get_a, set_a),
        ]);
        let names: Vec<_> = table.iter().map(|field| field.item_name).collect();
        assert_eq!(names, ["early", "first", "second", "late"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_accessors() {
        let field = FieldDescriptor::new("b", 0, ValueType::Bool, get_b, set_b)
            .with_converter(ConverterKind::SignedSpacing);
        assert_eq!(field.converter, ConverterKind::SignedSpacing);

        let mut sample = Sample::default();
        (field.set)(&mut sample, FieldValue::Bool(true)).unwrap();
        assert_eq!((field.get)(&sample), Some(FieldValue::Bool(true)));
        assert_eq!((field.set)(&mut sample, FieldValue::Int(1)), Err(ValueMismatch));
    }

    #[test]
    fn test_lookup() {
        let table = FieldTable::new(vec![FieldDescriptor::new("a", 0, ValueType::Int, get_a, set_a)]);
        assert!(table.get("a").is_some());
        assert!(table.get("b").is_none());
    }
}
