// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery: scan a plugins directory and build a registry.
//!
//! Each immediate subdirectory containing a `metadata.txt` is a candidate.
//! A broken descriptor never aborts the scan: the plugin is skipped, its
//! errors land in the report, and the remaining candidates still load.

use std::path::{Path, PathBuf};

use pluma_core::{PluginVersion, PlumaError};
use pluma_metadata::{load_descriptor, MetadataError, PluginMetadata, METADATA_FILE};

use crate::compat::CompatibilityWindow;
use crate::registry::{PluginRegistry, PluginStatus};

/// A candidate plugin that failed to load.
#[derive(Debug)]
pub struct DiscoveryFailure {
    /// The plugin directory that was skipped.
    pub path: PathBuf,
    /// Everything wrong with its descriptor.
    pub errors: Vec<MetadataError>,
}

/// Outcome of a discovery pass.
#[derive(Debug)]
pub struct DiscoveryReport {
    /// Registry of every plugin that loaded, status derived from
    /// host-version compatibility.
    pub registry: PluginRegistry,
    /// Candidates that were skipped, with their errors.
    pub failures: Vec<DiscoveryFailure>,
}

/// Scan `dir` for plugins and build a registry against `host_version`.
///
/// Fails only when the directory itself cannot be read; per-plugin
/// problems are collected in the report.
pub fn discover_plugins(
    dir: &Path,
    host_version: &PluginVersion,
) -> Result<DiscoveryReport, PlumaError> {
    let mut candidates = Vec::new();
    let read_dir = std::fs::read_dir(dir).map_err(|e| PlumaError::Discovery {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in read_dir {
        let entry = entry.map_err(|e| PlumaError::Discovery {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() && path.join(METADATA_FILE).is_file() {
            candidates.push(path);
        }
    }
    // Directory iteration order is platform-dependent.
    candidates.sort();

    let mut registry = PluginRegistry::new();
    let mut failures = Vec::new();

    for plugin_dir in candidates {
        let descriptor_path = plugin_dir.join(METADATA_FILE);
        let descriptor = match load_descriptor(&descriptor_path) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(
                    path = %descriptor_path.display(),
                    error = %e,
                    "skipping plugin with unreadable descriptor"
                );
                failures.push(DiscoveryFailure {
                    path: plugin_dir,
                    errors: vec![e],
                });
                continue;
            }
        };

        match PluginMetadata::from_descriptor(&descriptor) {
            Ok(metadata) => {
                let compatible =
                    CompatibilityWindow::from_metadata(&metadata).contains(host_version);
                let status = if compatible {
                    PluginStatus::Enabled
                } else {
                    tracing::info!(
                        plugin = %metadata.name,
                        minimum = %metadata.qgis_minimum_version,
                        "plugin is incompatible with host version {host_version}"
                    );
                    PluginStatus::Incompatible
                };
                registry.register_with_status(metadata, descriptor, Some(plugin_dir), status);
            }
            Err(errors) => {
                tracing::warn!(
                    path = %descriptor_path.display(),
                    count = errors.len(),
                    "skipping plugin with invalid metadata"
                );
                failures.push(DiscoveryFailure {
                    path: plugin_dir,
                    errors,
                });
            }
        }
    }

    Ok(DiscoveryReport { registry, failures })
}
