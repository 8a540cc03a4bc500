// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Pluma descriptor loader and host registry.

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use thiserror::Error;

/// A version string failed to parse as a [`PluginVersion`].
#[derive(Debug, Clone, Error)]
#[error("invalid version `{input}`: {reason}")]
pub struct InvalidVersion {
    /// The raw string that failed to parse.
    pub input: String,
    /// What was wrong with it.
    pub reason: String,
}

/// A plugin or host version in dotted-decimal form.
///
/// Descriptor files carry versions like `3.1.0`, `3.28` or `3.99`; unlike
/// strict semver, one- and two-component forms are accepted and missing
/// components compare as zero, so `3.1` and `3.1.0` are equal. An optional
/// pre-release qualifier is allowed after a hyphen (`2.0-beta`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginVersion(Version);

impl PluginVersion {
    /// Build a version from explicit components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Major component, used for the default maximum-version rule.
    pub fn major(&self) -> u64 {
        self.0.major
    }
}

impl FromStr for PluginVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(InvalidVersion {
                input: s.to_string(),
                reason: "empty string".to_string(),
            });
        }

        let (numeric, pre) = match raw.split_once('-') {
            Some((n, p)) => (n, Some(p)),
            None => (raw, None),
        };

        let components: Vec<&str> = numeric.split('.').collect();
        if components.len() > 3 {
            return Err(InvalidVersion {
                input: s.to_string(),
                reason: "expected at most 3 dot-separated components".to_string(),
            });
        }

        let mut parsed = [0u64; 3];
        for (i, component) in components.iter().enumerate() {
            parsed[i] = component.parse().map_err(|_| InvalidVersion {
                input: s.to_string(),
                reason: format!("component `{component}` is not a number"),
            })?;
        }

        let pre = match pre {
            Some(p) => Prerelease::new(p).map_err(|_| InvalidVersion {
                input: s.to_string(),
                reason: format!("invalid pre-release qualifier `{p}`"),
            })?,
            None => Prerelease::EMPTY,
        };

        Ok(Self(Version {
            major: parsed[0],
            minor: parsed[1],
            patch: parsed[2],
            pre,
            build: BuildMetadata::EMPTY,
        }))
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for PluginVersion {
    type Error = InvalidVersion;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PluginVersion> for String {
    fn from(v: PluginVersion) -> Self {
        v.to_string()
    }
}

/// Release maturity declared by the `status` key of a descriptor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Alpha,
    Beta,
    Rc,
    Final,
}
