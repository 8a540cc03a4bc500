// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. All errors are collected (does not fail fast).

use pluma_core::PluginVersion;

use crate::diagnostic::ConfigError;
use crate::model::PlumaConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &PlumaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.host.version.parse::<PluginVersion>() {
        errors.push(ConfigError::Validation {
            message: format!("host.version: {e}"),
        });
    }

    if !LOG_LEVELS.contains(&config.host.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "host.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.host.log_level
            ),
        });
    }

    for (i, dir) in config.plugins.directories.iter().enumerate() {
        if dir.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.directories[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
