// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-based parser for `metadata.txt` descriptor files.
//!
//! The format is INI-style UTF-8 text: `[section]` headers, `key=value`
//! lines, `#` comment lines, blank lines, and indented continuation lines
//! that extend the previous value (used by `changelog`). A single
//! synchronous read-and-parse; no retries, no caching.

use std::collections::BTreeMap;
use std::path::Path;

use miette::{NamedSource, SourceSpan};

use crate::descriptor::Descriptor;
use crate::diagnostic::MetadataError;

/// Parse a descriptor from text.
pub fn parse_descriptor(input: &str) -> Result<Descriptor, MetadataError> {
    parse_named(input, "<descriptor>")
}

/// Read and parse a descriptor file.
///
/// Fails with [`MetadataError::NotFound`] if the path does not exist, so
/// callers can distinguish an absent plugin from a broken one.
pub fn load_descriptor(path: impl AsRef<Path>) -> Result<Descriptor, MetadataError> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MetadataError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(MetadataError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let descriptor = parse_named(&content, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        sections = descriptor.len(),
        "descriptor loaded"
    );
    Ok(descriptor)
}

fn parse_named(input: &str, source_name: &str) -> Result<Descriptor, MetadataError> {
    // A UTF-8 BOM would otherwise glue itself to the first section header.
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let src = || Some(NamedSource::new(source_name, input.to_string()));
    let span = |start: usize, len: usize| Some(SourceSpan::new(start.into(), len));

    let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut current_section: Option<String> = None;
    let mut current_key: Option<String> = None;

    let mut offset = 0usize;
    for raw_line in input.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim();
        let indent = line.len() - line.trim_start().len();

        if trimmed.is_empty() {
            // Blank lines never extend a value.
            current_key = None;
        } else if indent > 0 {
            // Indented non-blank line: continuation of the previous value.
            match (&current_section, &current_key) {
                (Some(section), Some(key)) => {
                    if let Some(value) =
                        sections.get_mut(section).and_then(|keys| keys.get_mut(key))
                    {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                }
                _ => {
                    return Err(MetadataError::Syntax {
                        message: "continuation line without a preceding key=value line"
                            .to_string(),
                        span: span(offset + indent, trimmed.len()),
                        src: src(),
                    });
                }
            }
        } else if trimmed.starts_with('#') {
            // Comment line; ends any value in progress.
            current_key = None;
        } else if trimmed.starts_with('[') {
            if !trimmed.ends_with(']') {
                return Err(MetadataError::Syntax {
                    message: format!("unterminated section header `{trimmed}`"),
                    span: span(offset, trimmed.len()),
                    src: src(),
                });
            }
            let name = trimmed[1..trimmed.len() - 1].trim();
            if name.is_empty() {
                return Err(MetadataError::Syntax {
                    message: "empty section name".to_string(),
                    span: span(offset, trimmed.len()),
                    src: src(),
                });
            }
            if sections.contains_key(name) {
                return Err(MetadataError::Syntax {
                    message: format!("section [{name}] declared twice"),
                    span: span(offset, trimmed.len()),
                    src: src(),
                });
            }
            sections.insert(name.to_string(), BTreeMap::new());
            current_section = Some(name.to_string());
            current_key = None;
        } else if let Some((left, right)) = trimmed.split_once('=') {
            let key = left.trim();
            let value = right.trim();
            if key.is_empty() {
                return Err(MetadataError::Syntax {
                    message: "empty key before `=`".to_string(),
                    span: span(offset, trimmed.len()),
                    src: src(),
                });
            }
            let Some(section_name) = current_section.clone() else {
                return Err(MetadataError::Syntax {
                    message: format!(
                        "key `{key}` appears before the first [section] header"
                    ),
                    span: span(offset, trimmed.len()),
                    src: src(),
                });
            };
            let section = sections.entry(section_name.clone()).or_default();
            if section.contains_key(key) {
                return Err(MetadataError::DuplicateKey {
                    key: key.to_string(),
                    section: section_name,
                    span: span(offset, key.len()),
                    src: src(),
                });
            }
            section.insert(key.to_string(), value.to_string());
            current_key = Some(key.to_string());
        } else {
            return Err(MetadataError::Syntax {
                message: format!(
                    "line `{trimmed}` is not a comment, section header, or key=value pair"
                ),
                span: span(offset, trimmed.len()),
                src: src(),
            });
        }

        offset += raw_line.len() + 1;
    }

    Ok(Descriptor::from_sections(sections))
}
