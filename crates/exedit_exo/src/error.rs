// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the typed object file codec.

use exedit_ini::IniError;
use thiserror::Error;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExoError {
    /// Line format validation or parse failure
    #[error(transparent)]
    Ini(#[from] IniError),

    /// A present item could not be converted to its field type
    #[error("Item {item:?} has unconvertible value {text:?}")]
    Conversion {
        /// Item name
        item: String,
        /// Raw item text
        text: String,
    },

    /// A field value could not be written as text
    #[error("Field {item:?} holds a value that cannot be written")]
    Unwritable {
        /// Item name
        item: String,
    },

    /// A converter was handed a value or declared type it does not support
    #[error("Converter expected a {expected} value, got {found}")]
    ValueTypeMismatch {
        /// Declared type the converter was asked to handle
        expected: &'static str,
        /// What it received instead
        found: &'static str,
    },

    /// A required section is absent
    #[error("Missing section [{0}]")]
    MissingSection(String),

    /// A section did not contain any recognizable field
    #[error("Section [{0}] has no recognizable fields")]
    UnrecognizedSection(String),

    /// Failure inside a specific section
    #[error("In section [{section}]: {source}")]
    Section {
        /// Section name
        section: String,
        /// Underlying error
        #[source]
        source: Box<ExoError>,
    },
}

impl ExoError {
    /// Attach the name of the section being processed
    pub fn in_section(self, section: impl Into<String>) -> Self {
        Self::Section {
            section: section.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, ExoError>;
