// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed codec for exedit object (`.exo`) files.
//!
//! Builds on the section/item model from [`exedit_ini`]:
//! - [`converter`]: the closed set of text/value converters and their cache
//! - [`field`] and [`marshal`]: static field tables and the marshaller that
//!   drives them
//! - [`movable`]: animatable numeric values and the move mode catalog
//! - [`component`], [`layer_item`], [`object`]: the project object graph
//!
//! ```no_run
//! use exedit_exo::{CodecOptions, ExEditObject};
//!
//! # fn main() -> exedit_exo::Result<()> {
//! let text = std::fs::read_to_string("project.exo").unwrap_or_default();
//! let object = ExEditObject::parse(&text, &CodecOptions::default())?;
//! println!("{} layer items", object.layer_items.len());
//! let normalized = object.to_exo_string()?;
//! # let _ = normalized;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod component;
pub mod converter;
pub mod error;
pub mod field;
pub mod layer_item;
pub mod marshal;
pub mod movable;
pub mod object;

pub use color::Color;
pub use component::{Component, ComponentRecord};
pub use converter::{ConverterKind, ConverterRegistry, ExoEnum, FieldValue, ValueType};
pub use error::{ExoError, Result};
pub use field::{ExoRecord, FieldDescriptor, FieldTable};
pub use layer_item::LayerItem;
pub use movable::{MovableConstants, MovableParts, MovableValue, MoveMode};
pub use object::{CodecOptions, ExEditObject};
