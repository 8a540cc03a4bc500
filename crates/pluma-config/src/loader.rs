// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./pluma.toml` > `~/.config/pluma/pluma.toml`
//! > `/etc/pluma/pluma.toml` with environment variable overrides via the
//! `PLUMA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlumaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pluma/pluma.toml` (system-wide)
/// 3. `~/.config/pluma/pluma.toml` (user XDG config)
/// 4. `./pluma.toml` (local directory)
/// 5. `PLUMA_*` environment variables
pub fn load_config() -> Result<PlumaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlumaConfig::default()))
        .merge(Toml::file("/etc/pluma/pluma.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pluma/pluma.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pluma.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PlumaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlumaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlumaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlumaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names
/// themselves contain underscores: `PLUMA_VISIBILITY_SHOW_EXPERIMENTAL`
/// must map to `visibility.show_experimental`, not `visibility.show.experimental`.
fn env_provider() -> Env {
    Env::prefixed("PLUMA_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let mapped = key
            .as_str()
            .replacen("host_", "host.", 1)
            .replacen("plugins_", "plugins.", 1)
            .replacen("visibility_", "visibility.", 1);
        mapped.into()
    })
}
