// SPDX-License-Identifier: MIT OR Apache-2.0
//! Section/item line format used by exedit object files.
//!
//! This crate provides the generic two-level container model:
//! - [`Item`]: one `name=value` line
//! - [`ItemCollection`]: ordered items with unique names
//! - [`Section`]: a `[name]` header with its items
//! - [`SectionCollection`]: ordered sections with unique names
//!
//! and the [`parser`] that converts between text and the model, in lenient
//! or strict mode. Text is expected to be already decoded; code page handling
//! belongs to the caller.

pub mod error;
pub mod item;
pub mod parser;
pub mod section;

pub use error::{IniError, Result};
pub use item::{Item, ItemCollection, LINE_BREAK};
pub use parser::{parse, parse_with, write, IniParser, ParseMode};
pub use section::{Section, SectionCollection};
