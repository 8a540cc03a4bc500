// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed plugin metadata extracted from a descriptor.
//!
//! [`PluginMetadata`] is the host-facing view over the `[general]` section:
//! the registry reads `name` and `version` for identity,
//! `qgisMinimumVersion`/`qgisMaximumVersion` for compatibility, and
//! `experimental`/`deprecated` for visibility. Extraction collects every
//! problem in one pass instead of failing on the first.

use pluma_core::types::{PluginVersion, ReleaseStatus};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::descriptor::{Descriptor, GENERAL_SECTION};
use crate::diagnostic::{suggest_key, MetadataError};

/// Typed view over a descriptor's `[general]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Display name of the plugin.
    pub name: String,
    /// Plugin version.
    pub version: PluginVersion,
    /// Oldest host version the plugin supports.
    pub qgis_minimum_version: PluginVersion,
    /// Newest host version the plugin supports. Absent in many real-world
    /// descriptors; the compatibility window then defaults it.
    pub qgis_maximum_version: Option<PluginVersion>,
    /// One-line description shown in the registry UI.
    pub description: String,
    /// Release maturity from the `status` key.
    pub status: ReleaseStatus,
    /// Longer free-form description.
    pub about: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Author contact email.
    pub email: Option<String>,
    /// Multi-line changelog, newline-joined as parsed.
    pub changelog: Option<String>,
    /// Raw comma-separated tags string; see [`PluginMetadata::tag_list`].
    pub tags: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Issue tracker URL.
    pub tracker: Option<String>,
    /// Source repository URL.
    pub repository: Option<String>,
    /// Icon path relative to the plugin directory.
    pub icon: Option<String>,
    /// Menu category the plugin registers under.
    pub category: Option<String>,
    /// Plugin is flagged experimental and hidden by default.
    pub experimental: bool,
    /// Plugin is flagged deprecated and hidden by default.
    pub deprecated: bool,
}

/// Every `[general]` key the typed view reads. Keys outside this list are
/// permitted (real descriptors carry extras), but they are the only
/// candidates for misspelling suggestions.
pub const KNOWN_KEYS: [&str; 18] = [
    "name",
    "version",
    "qgisMinimumVersion",
    "qgisMaximumVersion",
    "description",
    "status",
    "about",
    "author",
    "email",
    "changelog",
    "tags",
    "homepage",
    "tracker",
    "repository",
    "icon",
    "category",
    "experimental",
    "deprecated",
];

/// Parse a descriptor boolean the way the original host does.
///
/// Accepts `true`/`false`, `yes`/`no`, `on`/`off`, and `1`/`0`,
/// case-insensitively. Returns `None` for anything else.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl PluginMetadata {
    /// Extract typed metadata from a parsed descriptor.
    ///
    /// Requires `name`, `version`, `qgisMinimumVersion`, `description`, and
    /// `status`; tolerates a missing `qgisMaximumVersion` (the strict
    /// validator still reports it). All problems are collected and returned
    /// together.
    pub fn from_descriptor(descriptor: &Descriptor) -> Result<Self, Vec<MetadataError>> {
        let Some(general) = descriptor.section(GENERAL_SECTION) else {
            return Err(vec![MetadataError::Validation {
                message: "descriptor has no [general] section".to_string(),
            }]);
        };
        // Only unrecognized keys are candidates for misspelling suggestions.
        let unrecognized: Vec<&str> = general
            .keys()
            .map(String::as_str)
            .filter(|key| !KNOWN_KEYS.contains(key))
            .collect();

        let mut errors = Vec::new();

        let require = |key: &str, errors: &mut Vec<MetadataError>| -> Option<String> {
            match general.get(key) {
                Some(value) if !value.is_empty() => Some(value.clone()),
                Some(_) => {
                    errors.push(MetadataError::InvalidValue {
                        key: key.to_string(),
                        detail: "value is empty".to_string(),
                        expected: "a non-empty string".to_string(),
                    });
                    None
                }
                None => {
                    errors.push(MetadataError::MissingKey {
                        key: key.to_string(),
                        suggestion: suggest_key(key, &unrecognized),
                    });
                    None
                }
            }
        };

        let name = require("name", &mut errors);
        let version_raw = require("version", &mut errors);
        let minimum_raw = require("qgisMinimumVersion", &mut errors);
        let description = require("description", &mut errors);
        let status_raw = require("status", &mut errors);

        let version = version_raw.and_then(|v| parse_version("version", &v, &mut errors));
        let qgis_minimum_version =
            minimum_raw.and_then(|v| parse_version("qgisMinimumVersion", &v, &mut errors));
        let qgis_maximum_version = general
            .get("qgisMaximumVersion")
            .and_then(|v| parse_version("qgisMaximumVersion", v, &mut errors));

        let status = status_raw.and_then(|v| match v.parse::<ReleaseStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(MetadataError::InvalidValue {
                    key: "status".to_string(),
                    detail: format!("unknown status `{v}`"),
                    expected: format!("one of: {}", ReleaseStatus::VARIANTS.join(", ")),
                });
                None
            }
        });

        let flag = |key: &str, errors: &mut Vec<MetadataError>| -> bool {
            match general.get(key) {
                None => false,
                Some(value) => match parse_flag(value) {
                    Some(flag) => flag,
                    None => {
                        errors.push(MetadataError::InvalidValue {
                            key: key.to_string(),
                            detail: format!("`{value}` is not a boolean"),
                            expected: "True or False".to_string(),
                        });
                        false
                    }
                },
            }
        };

        let experimental = flag("experimental", &mut errors);
        let deprecated = flag("deprecated", &mut errors);

        if let (Some(name), Some(version), Some(qgis_minimum_version), Some(description), Some(status)) =
            (name, version, qgis_minimum_version, description, status)
        {
            if errors.is_empty() {
                return Ok(Self {
                    name,
                    version,
                    qgis_minimum_version,
                    qgis_maximum_version,
                    description,
                    status,
                    about: general.get("about").cloned(),
                    author: general.get("author").cloned(),
                    email: general.get("email").cloned(),
                    changelog: general.get("changelog").cloned(),
                    tags: general.get("tags").cloned(),
                    homepage: general.get("homepage").cloned(),
                    tracker: general.get("tracker").cloned(),
                    repository: general.get("repository").cloned(),
                    icon: general.get("icon").cloned(),
                    category: general.get("category").cloned(),
                    experimental,
                    deprecated,
                });
            }
        }
        Err(errors)
    }

    /// Split the raw `tags` value on commas for display.
    ///
    /// The descriptor itself stores the raw string; splitting is a
    /// presentation concern and lives here with the host-facing view.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn parse_version(
    key: &str,
    value: &str,
    errors: &mut Vec<MetadataError>,
) -> Option<PluginVersion> {
    match value.parse() {
        Ok(version) => Some(version),
        Err(e) => {
            errors.push(MetadataError::InvalidValue {
                key: key.to_string(),
                detail: format!("{e}"),
                expected: "a dotted version like 3.1.0".to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_descriptor;

    const FULL: &str = "\
[general]
name=InaSAFE
qgisMinimumVersion=2.0
qgisMaximumVersion=2.99
description=Realistic natural hazard impact scenarios
version=3.1.0
status=alpha
author=Indonesian Government - BNPB
email=info@inasafe.org
tags=contingency planning, impact assessments
changelog=3.1.0
    - New impact function
homepage=http://www.inasafe.org
tracker=https://github.com/AIFDR/inasafe/issues
repository=https://github.com/AIFDR/inasafe
icon=icon.png
experimental=True
deprecated=False
";

    #[test]
    fn extracts_full_metadata() {
        let d = parse_descriptor(FULL).unwrap();
        let m = PluginMetadata::from_descriptor(&d).unwrap();

        assert_eq!(m.name, "InaSAFE");
        assert_eq!(m.version, "3.1.0".parse().unwrap());
        assert_eq!(m.qgis_minimum_version, "2.0".parse().unwrap());
        assert_eq!(m.qgis_maximum_version, Some("2.99".parse().unwrap()));
        assert_eq!(m.status, ReleaseStatus::Alpha);
        assert!(m.experimental);
        assert!(!m.deprecated);
        assert_eq!(m.author.as_deref(), Some("Indonesian Government - BNPB"));
        assert_eq!(m.changelog.as_deref(), Some("3.1.0\n- New impact function"));
    }

    #[test]
    fn minimal_metadata_defaults_flags_to_false() {
        let d = parse_descriptor(
            "[general]\nname=mini\nversion=1.0\nqgisMinimumVersion=3.0\n\
             description=A minimal plugin\nstatus=final\n",
        )
        .unwrap();
        let m = PluginMetadata::from_descriptor(&d).unwrap();

        assert!(!m.experimental);
        assert!(!m.deprecated);
        assert_eq!(m.qgis_maximum_version, None);
        assert_eq!(m.tags, None);
        assert!(m.tag_list().is_empty());
    }

    #[test]
    fn missing_name_is_reported() {
        let d = parse_descriptor(
            "[general]\nversion=1.0\nqgisMinimumVersion=3.0\ndescription=x\nstatus=final\n",
        )
        .unwrap();
        let errors = PluginMetadata::from_descriptor(&d).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, MetadataError::MissingKey { key, .. } if key == "name")));
    }

    #[test]
    fn misspelled_key_gets_a_suggestion() {
        let d = parse_descriptor(
            "[general]\nname=x\nversion=1.0\nqgisMinimumVesion=3.0\ndescription=x\nstatus=final\n",
        )
        .unwrap();
        let errors = PluginMetadata::from_descriptor(&d).unwrap_err();
        let missing = errors
            .iter()
            .find_map(|e| match e {
                MetadataError::MissingKey { key, suggestion } if key == "qgisMinimumVersion" => {
                    Some(suggestion.clone())
                }
                _ => None,
            })
            .expect("qgisMinimumVersion should be reported missing");
        assert_eq!(missing.as_deref(), Some("qgisMinimumVesion"));
    }

    #[test]
    fn invalid_boolean_is_reported() {
        let d = parse_descriptor(
            "[general]\nname=x\nversion=1.0\nqgisMinimumVersion=3.0\ndescription=x\n\
             status=final\nexperimental=maybe\n",
        )
        .unwrap();
        let errors = PluginMetadata::from_descriptor(&d).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, MetadataError::InvalidValue { key, .. } if key == "experimental")
        ));
    }

    #[test]
    fn unknown_status_lists_valid_values() {
        let d = parse_descriptor(
            "[general]\nname=x\nversion=1.0\nqgisMinimumVersion=3.0\ndescription=x\n\
             status=experimental\n",
        )
        .unwrap();
        let errors = PluginMetadata::from_descriptor(&d).unwrap_err();
        let err = errors
            .iter()
            .find(|e| matches!(e, MetadataError::InvalidValue { key, .. } if key == "status"))
            .expect("status error");
        let rendered = format!("{err}");
        assert!(rendered.contains("experimental"));
    }

    #[test]
    fn all_problems_are_collected_in_one_pass() {
        let d = parse_descriptor(
            "[general]\nversion=abc\nqgisMinimumVersion=3.0\nstatus=bogus\n",
        )
        .unwrap();
        let errors = PluginMetadata::from_descriptor(&d).unwrap_err();
        // missing name, missing description, bad version, bad status
        assert!(errors.len() >= 4, "got {errors:?}");
    }

    #[test]
    fn no_general_section_is_one_error() {
        let d = parse_descriptor("[other]\nname=x\n").unwrap();
        let errors = PluginMetadata::from_descriptor(&d).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("[general]"));
    }

    #[test]
    fn tag_list_splits_and_trims() {
        let d = parse_descriptor(
            "[general]\nname=x\nversion=1.0\nqgisMinimumVersion=3.0\ndescription=x\n\
             status=final\ntags=a, b ,c,\n",
        )
        .unwrap();
        let m = PluginMetadata::from_descriptor(&d).unwrap();
        assert_eq!(m.tags.as_deref(), Some("a, b ,c,"));
        assert_eq!(m.tag_list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn configparser_boolean_spellings_are_accepted() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("Off"), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
