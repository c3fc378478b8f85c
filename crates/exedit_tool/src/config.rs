// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tool configuration stored as RON.
//!
//! ```ron
//! (
//!     codec: (parse_mode: Strict, parallel: true),
//!     log_filter: Some("exedit=debug"),
//! )
//! ```

use crate::error::{Result, ToolError};
use exedit_exo::CodecOptions;
use exedit_ini::ParseMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "exo_tool.ron";

/// Settings for the command-line tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Codec options
    pub codec: CodecOptions,
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl ToolConfig {
    /// Parse config text; `path` is only used in error messages
    pub fn from_ron(text: &str, path: &Path) -> Result<Self> {
        ron::from_str(text).map_err(|e| ToolError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ToolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content, path)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(&fallback);
        }
        Ok(Self::default())
    }

    /// Apply command-line switches on top of the file settings
    pub fn apply_overrides(&mut self, strict: bool, sequential: bool) {
        if strict {
            self.codec.parse_mode = ParseMode::Strict;
        }
        if sequential {
            self.codec.parallel = false;
        }
    }
}
