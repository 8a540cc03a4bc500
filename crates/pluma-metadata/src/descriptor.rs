// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The parsed descriptor mapping.
//!
//! A [`Descriptor`] is a mapping from section name to a mapping from key to
//! string value. It carries no interpretation: `tags=a, b, c` stays the raw
//! string `"a, b, c"`, and list-splitting is the caller's concern.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The section the host plugin manager interprets.
pub const GENERAL_SECTION: &str = "general";

/// A parsed plugin descriptor: sections of key-value pairs.
///
/// Created by parsing a `metadata.txt` file at plugin-discovery time and
/// immutable thereafter as far as the host is concerned. Sections and keys
/// iterate in lexical order, so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Descriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Used by the parser once a file has been fully read.
    pub(crate) fn from_sections(sections: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { sections }
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the descriptor has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns true if the named section exists.
    pub fn contains_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// The key-value mapping of a section, if present.
    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(section)
    }

    /// Iterate over sections in lexical order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.sections.iter().map(|(name, keys)| (name.as_str(), keys))
    }

    /// Look up a value by section and key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Look up a value in the `[general]` section.
    pub fn general(&self, key: &str) -> Option<&str> {
        self.get(GENERAL_SECTION, key)
    }

    /// Insert a key-value pair, creating the section if needed.
    ///
    /// Returns the previous value if the key already existed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into())
    }

    /// Serialize back to descriptor text.
    ///
    /// Multi-line values are written with 4-space continuation indentation,
    /// so re-parsing the output yields the same mapping. Values containing
    /// empty interior lines are not representable in the format and
    /// serialize lossily; parsed descriptors never contain them.
    pub fn to_descriptor_string(&self) -> String {
        let mut out = String::new();
        for (i, (name, keys)) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, value) in keys {
                let mut lines = value.split('\n');
                let first = lines.next().unwrap_or("");
                out.push_str(key);
                out.push('=');
                out.push_str(first);
                out.push('\n');
                for continuation in lines {
                    out.push_str("    ");
                    out.push_str(continuation);
                    out.push('\n');
                }
            }
        }
        out
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut d = Descriptor::new();
        assert!(d.is_empty());

        d.set("general", "name", "InaSAFE");
        assert_eq!(d.general("name"), Some("InaSAFE"));
        assert_eq!(d.get("general", "name"), Some("InaSAFE"));
        assert_eq!(d.get("general", "missing"), None);
        assert_eq!(d.get("other", "name"), None);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn set_returns_previous_value() {
        let mut d = Descriptor::new();
        assert_eq!(d.set("general", "version", "1.0"), None);
        assert_eq!(
            d.set("general", "version", "2.0"),
            Some("1.0".to_string())
        );
        assert_eq!(d.general("version"), Some("2.0"));
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut d = Descriptor::new();
        d.set("zeta", "k", "v");
        d.set("general", "name", "test");
        d.set("general", "version", "1.0");

        let text = d.to_descriptor_string();
        assert_eq!(text, "[general]\nname=test\nversion=1.0\n\n[zeta]\nk=v\n");
        assert_eq!(text, d.to_descriptor_string());
    }

    #[test]
    fn multiline_value_uses_continuation_indent() {
        let mut d = Descriptor::new();
        d.set("general", "changelog", "1.1\n- fixed crash\n- new icons");

        let text = d.to_descriptor_string();
        assert_eq!(
            text,
            "[general]\nchangelog=1.1\n    - fixed crash\n    - new icons\n"
        );
    }

    #[test]
    fn serializes_as_plain_json_map() {
        let mut d = Descriptor::new();
        d.set("general", "name", "test");

        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["general"]["name"], "test");

        let back: Descriptor = serde_json::from_value(json).unwrap();
        assert_eq!(d, back);
    }
}
