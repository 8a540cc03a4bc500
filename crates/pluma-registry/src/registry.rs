// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry for managing discovered plugins.
//!
//! The `PluginRegistry` stores `PluginEntry` records keyed by plugin name.
//! Each entry holds the typed metadata, the raw descriptor mapping for
//! display, the plugin directory it came from, and its current status.

use std::collections::HashMap;
use std::path::PathBuf;

use pluma_core::PlumaError;
use pluma_metadata::{Descriptor, PluginMetadata};
use serde::Serialize;

use crate::compat::VisibilityPolicy;

/// Status of a plugin in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginStatus {
    /// Plugin is active and will be offered to the host.
    Enabled,
    /// Plugin is explicitly disabled by the user.
    Disabled,
    /// Host version falls outside the plugin's declared window.
    Incompatible,
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginStatus::Enabled => write!(f, "enabled"),
            PluginStatus::Disabled => write!(f, "disabled"),
            PluginStatus::Incompatible => write!(f, "incompatible"),
        }
    }
}

/// A single entry in the plugin registry.
#[derive(Debug, Clone, Serialize)]
pub struct PluginEntry {
    /// Typed view the host reads for identity, compatibility, visibility.
    pub metadata: PluginMetadata,
    /// The raw parsed descriptor, kept for registry UI display.
    pub descriptor: Descriptor,
    /// Current status of the plugin.
    pub status: PluginStatus,
    /// Directory the plugin was discovered in, if any.
    pub path: Option<PathBuf>,
}

/// Registry of discovered plugins, keyed by plugin name.
///
/// Supports registration, lookup, visibility filtering, search, and status
/// toggling. Rebuilt from scratch on every discovery pass; entries are
/// immutable apart from their status.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: HashMap<String, PluginEntry>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin with default status `Enabled`.
    pub fn register(
        &mut self,
        metadata: PluginMetadata,
        descriptor: Descriptor,
        path: Option<PathBuf>,
    ) {
        self.register_with_status(metadata, descriptor, path, PluginStatus::Enabled);
    }

    /// Register a plugin with an explicit status.
    ///
    /// Re-registering a name replaces the previous entry.
    pub fn register_with_status(
        &mut self,
        metadata: PluginMetadata,
        descriptor: Descriptor,
        path: Option<PathBuf>,
        status: PluginStatus,
    ) {
        let name = metadata.name.clone();
        if self.entries.contains_key(&name) {
            tracing::warn!(plugin = %name, "duplicate plugin name, replacing earlier entry");
        }
        self.entries.insert(
            name,
            PluginEntry {
                metadata,
                descriptor,
                status,
                path,
            },
        );
    }

    /// Get a plugin entry by name.
    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.entries.get(name)
    }

    /// All enabled plugins the given policy allows to be shown.
    pub fn get_visible(&self, policy: VisibilityPolicy) -> Vec<&PluginEntry> {
        let mut entries: Vec<&PluginEntry> = self
            .entries
            .values()
            .filter(|e| e.status == PluginStatus::Enabled && policy.is_visible(&e.metadata))
            .collect();
        entries.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        entries
    }

    /// List all plugin entries, sorted by name.
    pub fn list_all(&self) -> Vec<&PluginEntry> {
        let mut entries: Vec<&PluginEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        entries
    }

    /// Search entries whose name or description contains the query,
    /// case-insensitively. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&PluginEntry> {
        if query.is_empty() {
            return self.list_all();
        }
        let query = query.to_lowercase();
        let mut entries: Vec<&PluginEntry> = self
            .entries
            .values()
            .filter(|e| {
                e.metadata.name.to_lowercase().contains(&query)
                    || e.metadata.description.to_lowercase().contains(&query)
            })
            .collect();
        entries.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        entries
    }

    /// Toggle a plugin's enabled status.
    ///
    /// Toggling does not resurrect an incompatible plugin: enabling one is
    /// rejected so the host cannot load a plugin outside its window.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), PlumaError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| PlumaError::PluginNotFound {
                name: name.to_string(),
            })?;
        if enabled && entry.status == PluginStatus::Incompatible {
            return Err(PlumaError::Metadata {
                message: format!("plugin `{name}` is incompatible with this host version"),
                source: None,
            });
        }
        entry.status = if enabled {
            PluginStatus::Enabled
        } else {
            PluginStatus::Disabled
        };
        Ok(())
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_parts(name: &str, flags: &str) -> (PluginMetadata, Descriptor) {
        let text = format!(
            "[general]\nname={name}\nversion=1.0\nqgisMinimumVersion=3.0\n\
             description=Test plugin {name}\nstatus=final\n{flags}"
        );
        let descriptor = pluma_metadata::parse_descriptor(&text).unwrap();
        let metadata = PluginMetadata::from_descriptor(&descriptor).unwrap();
        (metadata, descriptor)
    }

    fn register(registry: &mut PluginRegistry, name: &str, flags: &str) {
        let (metadata, descriptor) = entry_parts(name, flags);
        registry.register(metadata, descriptor, None);
    }

    #[test]
    fn register_and_get_roundtrip() {
        let mut registry = PluginRegistry::new();
        register(&mut registry, "inasafe", "");

        let entry = registry.get("inasafe").unwrap();
        assert_eq!(entry.metadata.name, "inasafe");
        assert_eq!(entry.status, PluginStatus::Enabled);
        assert_eq!(entry.descriptor.general("name"), Some("inasafe"));
    }

    #[test]
    fn list_all_returns_sorted() {
        let mut registry = PluginRegistry::new();
        register(&mut registry, "zebra", "");
        register(&mut registry, "alpha", "");
        register(&mut registry, "middle", "");

        let all = registry.list_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].metadata.name, "alpha");
        assert_eq!(all[1].metadata.name, "middle");
        assert_eq!(all[2].metadata.name, "zebra");
    }

    #[test]
    fn get_visible_applies_policy_and_status() {
        let mut registry = PluginRegistry::new();
        register(&mut registry, "plain", "");
        register(&mut registry, "lab", "experimental=True\n");
        register(&mut registry, "legacy", "deprecated=True\n");
        registry.set_enabled("plain", false).unwrap();

        let hidden = registry.get_visible(VisibilityPolicy::default());
        assert!(hidden.is_empty());

        registry.set_enabled("plain", true).unwrap();
        let visible = registry.get_visible(VisibilityPolicy::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].metadata.name, "plain");

        let everything = registry.get_visible(VisibilityPolicy {
            show_experimental: true,
            show_deprecated: true,
        });
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn set_enabled_toggles_status() {
        let mut registry = PluginRegistry::new();
        register(&mut registry, "inasafe", "");

        registry.set_enabled("inasafe", false).unwrap();
        assert_eq!(registry.get("inasafe").unwrap().status, PluginStatus::Disabled);

        registry.set_enabled("inasafe", true).unwrap();
        assert_eq!(registry.get("inasafe").unwrap().status, PluginStatus::Enabled);
    }

    #[test]
    fn set_enabled_unknown_plugin_is_an_error() {
        let mut registry = PluginRegistry::new();
        let err = registry.set_enabled("nonexistent", true).unwrap_err();
        assert!(matches!(err, PlumaError::PluginNotFound { .. }));
    }

    #[test]
    fn incompatible_plugin_cannot_be_enabled() {
        let mut registry = PluginRegistry::new();
        let (metadata, descriptor) = entry_parts("old", "");
        registry.register_with_status(metadata, descriptor, None, PluginStatus::Incompatible);

        assert!(registry.set_enabled("old", true).is_err());
        // Disabling is still allowed.
        registry.set_enabled("old", false).unwrap();
        assert_eq!(registry.get("old").unwrap().status, PluginStatus::Disabled);
    }

    #[test]
    fn search_matches_name_and_description() {
        let mut registry = PluginRegistry::new();
        register(&mut registry, "inasafe", "");
        register(&mut registry, "router", "");

        let by_name = registry.search("INASAFE");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].metadata.name, "inasafe");

        // All test descriptions contain "Test plugin".
        assert_eq!(registry.search("test plugin").len(), 2);
        assert_eq!(registry.search("").len(), 2);
        assert!(registry.search("xyz_nonexistent").is_empty());
    }

    #[test]
    fn reregistering_replaces_entry() {
        let mut registry = PluginRegistry::new();
        register(&mut registry, "inasafe", "");
        register(&mut registry, "inasafe", "experimental=True\n");

        assert_eq!(registry.len(), 1);
        assert!(registry.get("inasafe").unwrap().metadata.experimental);
    }

    #[test]
    fn entry_serializes_for_json_output() {
        let (metadata, descriptor) = entry_parts("inasafe", "");
        let entry = PluginEntry {
            metadata,
            descriptor,
            status: PluginStatus::Enabled,
            path: Some("/plugins/inasafe".into()),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "enabled");
        assert_eq!(json["metadata"]["name"], "inasafe");
        assert_eq!(json["descriptor"]["general"]["name"], "inasafe");
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        register(&mut registry, "one", "");
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }
}
