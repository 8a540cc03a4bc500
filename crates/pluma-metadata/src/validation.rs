// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict descriptor validation.
//!
//! Validates the contract the registry UI depends on: every mandatory
//! `[general]` key present, versions parseable, booleans well-formed.
//! All errors are collected (does not fail fast).

use crate::descriptor::{Descriptor, GENERAL_SECTION};
use crate::diagnostic::{suggest_key, MetadataError};
use crate::plugin::PluginMetadata;

/// Keys the `[general]` section must contain.
pub const MANDATORY_KEYS: [&str; 6] = [
    "name",
    "qgisMinimumVersion",
    "qgisMaximumVersion",
    "description",
    "version",
    "status",
];

/// Validate a descriptor against the full registry contract.
///
/// Stricter than [`PluginMetadata::from_descriptor`]: a missing
/// `qgisMaximumVersion` is also reported here, even though the
/// compatibility window can default it.
pub fn validate_descriptor(descriptor: &Descriptor) -> Result<(), Vec<MetadataError>> {
    let mut errors = match PluginMetadata::from_descriptor(descriptor) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    };

    if let Some(general) = descriptor.section(GENERAL_SECTION) {
        if !general.contains_key("qgisMaximumVersion") {
            let unrecognized: Vec<&str> = general
                .keys()
                .map(String::as_str)
                .filter(|key| !crate::plugin::KNOWN_KEYS.contains(key))
                .collect();
            errors.push(MetadataError::MissingKey {
                key: "qgisMaximumVersion".to_string(),
                suggestion: suggest_key("qgisMaximumVersion", &unrecognized),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
