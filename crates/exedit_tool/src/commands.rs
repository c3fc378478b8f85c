// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subcommand implementations.

use crate::error::{Result, ToolError};
use exedit_exo::{CodecOptions, ExEditObject};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Decode file bytes as UTF-8, dropping a byte order mark
pub fn decode_text(path: &Path, bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| ToolError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Read and parse a project file
pub fn load(path: &Path, options: &CodecOptions) -> Result<ExEditObject> {
    let bytes = std::fs::read(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(path, bytes)?;
    let object = ExEditObject::parse(&text, options).map_err(|source| ToolError::Codec {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), layer_items = object.layer_items.len(), "Loaded");
    Ok(object)
}

/// Overview of a project printed by `check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Canvas size
    pub size: (i32, i32),
    /// Frames per second, if defined
    pub frame_rate: Option<String>,
    /// Length in frames
    pub length: i32,
    /// Number of layer items
    pub layer_items: usize,
    /// Component count per kind
    pub components: BTreeMap<&'static str, usize>,
}

impl Summary {
    /// Summarize a project
    pub fn of(object: &ExEditObject) -> Self {
        let mut components = BTreeMap::new();
        for component in object.layer_items.iter().flat_map(|item| &item.components) {
            *components.entry(component.kind_name()).or_insert(0) += 1;
        }
        Self {
            size: (object.width, object.height),
            frame_rate: object.frame_rate().map(|rate| rate.round_dp(3).normalize().to_string()),
            length: object.length,
            layer_items: object.layer_items.len(),
            components,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size;
        write!(f, "{width}x{height}")?;
        if let Some(rate) = &self.frame_rate {
            write!(f, " @ {rate} fps")?;
        }
        write!(f, ", {} frames, {} layer items", self.length, self.layer_items)?;
        if !self.components.is_empty() {
            let counts: Vec<String> = self
                .components
                .iter()
                .map(|(kind, count)| format!("{kind}: {count}"))
                .collect();
            write!(f, " ({})", counts.join(", "))?;
        }
        Ok(())
    }
}

/// `check`: parse and summarize
pub fn check(path: &Path, options: &CodecOptions) -> Result<Summary> {
    load(path, options).map(|object| Summary::of(&object))
}

/// `dump`: render the object graph as pretty RON
pub fn dump(path: &Path, options: &CodecOptions) -> Result<String> {
    let object = load(path, options)?;
    Ok(ron::ser::to_string_pretty(&object, ron::ser::PrettyConfig::default())?)
}

/// `normalize`: parse and write back, to `output` or as the returned text
pub fn normalize(path: &Path, output: Option<&Path>, options: &CodecOptions) -> Result<Option<String>> {
    let object = load(path, options)?;
    let text = object
        .to_exo_string_with(options)
        .map_err(|source| ToolError::Codec {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(output) = output else {
        return Ok(Some(text));
    };
    std::fs::write(output, text).map_err(|source| ToolError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %output.display(), "Written");
    Ok(None)
}
