// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Pluma host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Pluma configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlumaConfig {
    /// Host identity settings.
    #[serde(default)]
    pub host: HostConfig,

    /// Plugin discovery settings.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Visibility policy for flagged plugins.
    #[serde(default)]
    pub visibility: VisibilityConfig,
}

/// Host identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Host version plugins are checked against.
    #[serde(default = "default_host_version")]
    pub version: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: default_host_version(),
            log_level: default_log_level(),
        }
    }
}

fn default_host_version() -> String {
    "3.40".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Plugin discovery configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Directories scanned for plugin subdirectories.
    #[serde(default)]
    pub directories: Vec<String>,
}

/// Visibility policy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Show plugins flagged `experimental=True`.
    #[serde(default)]
    pub show_experimental: bool,

    /// Show plugins flagged `deprecated=True`.
    #[serde(default)]
    pub show_deprecated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = PlumaConfig::default();
        assert_eq!(config.host.version, "3.40");
        assert_eq!(config.host.log_level, "info");
        assert!(config.plugins.directories.is_empty());
        assert!(!config.visibility.show_experimental);
        assert!(!config.visibility.show_deprecated);
    }

    #[test]
    fn full_config_deserializes() {
        let toml_str = r#"
[host]
version = "3.28.4"
log_level = "debug"

[plugins]
directories = ["/opt/plugins", "~/.local/share/pluma/plugins"]

[visibility]
show_experimental = true
"#;
        let config: PlumaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host.version, "3.28.4");
        assert_eq!(config.plugins.directories.len(), 2);
        assert!(config.visibility.show_experimental);
        assert!(!config.visibility.show_deprecated);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[host]
verison = "3.28"
"#;
        assert!(toml::from_str::<PlumaConfig>(toml_str).is_err());
    }
}
