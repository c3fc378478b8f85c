// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversion between line format text and [`SectionCollection`].
//!
//! The grammar is line based:
//! - blank lines and lines starting with `;` are ignored
//! - `[name]` opens a new section
//! - `name=value` adds an item to the current section
//!
//! Item names are trimmed, values are only trimmed on the left so trailing
//! spaces survive. Both CRLF and LF input are accepted; output always uses
//! CRLF.

use crate::error::{IniError, Result};
use crate::item::Item;
use crate::section::{Section, SectionCollection};
use serde::{Deserialize, Serialize};

/// How the parser treats lines it cannot place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseMode {
    /// Skip item lines outside a section and lines without `=`
    #[default]
    Lenient,
    /// Reject them with a format error
    Strict,
}

/// Line format parser
#[derive(Debug, Clone, Copy, Default)]
pub struct IniParser {
    /// Strictness
    pub mode: ParseMode,
}

impl IniParser {
    /// Create a parser with the given mode
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Create a strict parser
    pub fn strict() -> Self {
        Self::new(ParseMode::Strict)
    }

    /// Parse decoded text into sections
    pub fn parse(&self, text: &str) -> Result<SectionCollection> {
        let mut sections = SectionCollection::new();
        let mut skipped = 0usize;

        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }

            if let Some(name) = header_name(trimmed) {
                let section = Section::new(name).map_err(|e| IniError::MalformedHeader {
                    line,
                    reason: e.to_string(),
                })?;
                sections.push(section)?;
                continue;
            }

            let Some(section) = sections.last_mut() else {
                if self.mode == ParseMode::Strict {
                    return Err(IniError::ItemOutsideSection { line });
                }
                tracing::debug!("Skipping line {line}: item before any section");
                skipped += 1;
                continue;
            };

            let Some((name, value)) = raw_line.split_once('=') else {
                if self.mode == ParseMode::Strict {
                    return Err(IniError::MissingSeparator {
                        line,
                        section: section.name().to_string(),
                    });
                }
                tracing::debug!("Skipping line {line} in [{}]: no '='", section.name());
                skipped += 1;
                continue;
            };

            let item = Item::new(name.trim(), value.trim_start()).map_err(|e| {
                IniError::MalformedItem {
                    line,
                    reason: e.to_string(),
                }
            })?;
            section.items.push(item).map_err(|e| match e {
                IniError::DuplicateItem { name, .. } => IniError::DuplicateItem {
                    section: Some(section.name().to_string()),
                    name,
                },
                other => other,
            })?;
        }

        tracing::debug!(
            sections = sections.len(),
            skipped,
            "Parsed line format text"
        );
        Ok(sections)
    }
}

/// Name inside a `[...]` header line, if the trimmed line is one
fn header_name(trimmed: &str) -> Option<&str> {
    trimmed.strip_prefix('[')?.strip_suffix(']')
}

/// Parse text leniently
pub fn parse(text: &str) -> Result<SectionCollection> {
    IniParser::default().parse(text)
}

/// Parse text with an explicit mode
pub fn parse_with(text: &str, mode: ParseMode) -> Result<SectionCollection> {
    IniParser::new(mode).parse(text)
}

/// Write sections back to text (CRLF line endings, no trailing newline)
pub fn write(sections: &SectionCollection) -> String {
    sections.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[exedit]\r\nwidth=1280\r\nheight=720\r\n\r\n; comment\r\n[0]\r\nstart=1\r\nend=60\r\n";

    #[test]
    fn test_parse_sample() {
        let sections = parse(SAMPLE).unwrap();
        assert_eq!(sections.names().collect::<Vec<_>>(), ["exedit", "0"]);
        assert_eq!(sections.get("exedit").unwrap().items.value("width"), Some("1280"));
        assert_eq!(sections.get("0").unwrap().items.value("end"), Some("60"));
    }

    #[test]
    fn test_accepts_lf() {
        let sections = parse("[a]\nx=1\n[b]\ny=2").unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("b").unwrap().items.value("y"), Some("2"));
    }

    #[test]
    fn test_value_trimming() {
        let sections = parse("[a]\n  name  =  value with spaces  \nempty=\n").unwrap();
        let items = &sections.get("a").unwrap().items;
        assert_eq!(items.value("name"), Some("value with spaces  "));
        assert_eq!(items.value("empty"), Some(""));
    }

    #[test]
    fn test_split_at_first_equals() {
        let sections = parse("[a]\nfile=C:\\a=b.wav").unwrap();
        assert_eq!(sections.get("a").unwrap().items.value("file"), Some("C:\\a=b.wav"));
    }

    #[test]
    fn test_item_before_section() {
        let text = "orphan=1\n[a]\nx=1";

        let sections = parse(text).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("a").unwrap().items.len(), 1);

        let err = IniParser::strict().parse(text).unwrap_err();
        assert_eq!(err, IniError::ItemOutsideSection { line: 1 });
    }

    #[test]
    fn test_missing_separator() {
        let text = "[a]\nnot an item\nx=1";

        let sections = parse(text).unwrap();
        assert_eq!(sections.get("a").unwrap().items.len(), 1);

        let err = parse_with(text, ParseMode::Strict).unwrap_err();
        assert_eq!(
            err,
            IniError::MissingSeparator {
                line: 2,
                section: "a".into()
            }
        );
    }

    #[test]
    fn test_duplicates_fatal_in_every_mode() {
        for mode in [ParseMode::Lenient, ParseMode::Strict] {
            let err = parse_with("[a]\n[a]", mode).unwrap_err();
            assert!(matches!(err, IniError::DuplicateSection { .. }));

            let err = parse_with("[a]\nx=1\nx=2", mode).unwrap_err();
            assert_eq!(
                err,
                IniError::DuplicateItem {
                    section: Some("a".into()),
                    name: "x".into()
                }
            );
        }
    }

    #[test]
    fn test_malformed_header() {
        let err = parse("[]\nx=1").unwrap_err();
        assert!(matches!(err, IniError::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn test_empty_item_name() {
        let err = parse("[a]\n=1").unwrap_err();
        assert!(matches!(err, IniError::MalformedItem { line: 2, .. }));
    }

    #[test]
    fn test_round_trip() {
        let sections = parse(SAMPLE).unwrap();
        let written = write(&sections);
        assert_eq!(
            written,
            "[exedit]\r\nwidth=1280\r\nheight=720\r\n[0]\r\nstart=1\r\nend=60"
        );
        assert_eq!(parse(&written).unwrap(), sections);
    }

    #[test]
    fn test_round_trip_built_collection() {
        let mut sections = SectionCollection::new();
        let mut first = Section::new("1.0").unwrap();
        first.items.push_new("_name", "テキスト").unwrap();
        first.items.push_new("font", "MS UI Gothic  ").unwrap();
        first.items.push_new("odd[name]", "a=b;c").unwrap();
        sections.push(first).unwrap();
        sections.push(Section::new("empty").unwrap()).unwrap();
        sections.push(Section::new(" spaced ").unwrap()).unwrap();

        let reparsed = parse_with(&write(&sections), ParseMode::Strict).unwrap();
        assert_eq!(reparsed, sections);
    }

    #[test]
    fn test_leading_value_whitespace_cannot_be_built() {
        let mut section = Section::new("0.0").unwrap();
        let err = section.items.push_new("font", " Meiryo").unwrap_err();
        assert!(matches!(err, IniError::InvalidValue { .. }));

        // Parsed values never carry it, so they always round trip
        let sections = parse("[0.0]\nfont=   Meiryo \n").unwrap();
        assert_eq!(sections.get("0.0").unwrap().items.value("font"), Some("Meiryo "));
        assert_eq!(parse(&write(&sections)).unwrap(), sections);
    }
}
