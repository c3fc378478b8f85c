// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised by the line format model and parser.

use thiserror::Error;

/// Line format errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IniError {
    /// Item or section name failed validation
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Item value failed validation
    #[error("Invalid value for item {name:?}: {reason}")]
    InvalidValue {
        /// Name of the item the value was meant for
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Two items in one collection share a name
    #[error("Duplicate item {name:?}{}", section_suffix(.section))]
    DuplicateItem {
        /// Section the item belongs to, when known
        section: Option<String>,
        /// The duplicated item name
        name: String,
    },

    /// Two sections share a name
    #[error("Duplicate section [{name}]")]
    DuplicateSection {
        /// The duplicated section name
        name: String,
    },

    /// Section header line could not be read
    #[error("Line {line}: malformed section header: {reason}")]
    MalformedHeader {
        /// One-based line number
        line: usize,
        /// Underlying name validation failure
        reason: String,
    },

    /// Item line whose name or value failed validation
    #[error("Line {line}: malformed item: {reason}")]
    MalformedItem {
        /// One-based line number
        line: usize,
        /// Underlying validation failure
        reason: String,
    },

    /// Item line found before the first section header
    #[error("Line {line}: item appears before any section")]
    ItemOutsideSection {
        /// One-based line number
        line: usize,
    },

    /// Line inside a section has no `=` separator
    #[error("Line {line}: missing '=' in section [{section}]")]
    MissingSeparator {
        /// One-based line number
        line: usize,
        /// Section the line appeared in
        section: String,
    },
}

fn section_suffix(section: &Option<String>) -> String {
    match section {
        Some(name) => format!(" in section [{name}]"),
        None => String::new(),
    }
}

/// Result type for line format operations
pub type Result<T> = std::result::Result<T, IniError>;
