// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors reported by the command-line tool.

use exedit_exo::ExoError;
use std::path::PathBuf;
use thiserror::Error;

/// Tool failures
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input is not UTF-8
    #[error("{} is not UTF-8 text; convert it from its code page first", path.display())]
    NotUtf8 {
        /// File path
        path: PathBuf,
    },

    /// The config file is malformed
    #[error("Invalid config {}: {message}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The project file could not be read or written
    #[error("{}: {source}", path.display())]
    Codec {
        /// Project file path
        path: PathBuf,
        /// Codec error
        #[source]
        source: ExoError,
    },

    /// The object graph could not be rendered as RON
    #[error("Failed to render RON: {0}")]
    Ron(#[from] ron::Error),
}

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
