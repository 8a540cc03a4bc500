// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-version compatibility and visibility rules.
//!
//! The host reads `qgisMinimumVersion`/`qgisMaximumVersion` to decide
//! whether a plugin can run, and `experimental`/`deprecated` to decide
//! whether it is shown. A descriptor without a maximum gets the installer
//! default of `<minimum major>.99.99`.

use pluma_core::PluginVersion;
use pluma_metadata::PluginMetadata;

/// The host-version window a plugin declares support for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityWindow {
    minimum: PluginVersion,
    maximum: Option<PluginVersion>,
}

impl CompatibilityWindow {
    /// Build a window from explicit bounds.
    pub fn new(minimum: PluginVersion, maximum: Option<PluginVersion>) -> Self {
        Self { minimum, maximum }
    }

    /// The window a plugin's metadata declares.
    pub fn from_metadata(metadata: &PluginMetadata) -> Self {
        Self {
            minimum: metadata.qgis_minimum_version.clone(),
            maximum: metadata.qgis_maximum_version.clone(),
        }
    }

    /// The declared maximum, or the `<minimum major>.99.99` default.
    pub fn effective_maximum(&self) -> PluginVersion {
        self.maximum
            .clone()
            .unwrap_or_else(|| PluginVersion::new(self.minimum.major(), 99, 99))
    }

    /// True when the host version falls inside the window (inclusive).
    pub fn contains(&self, host: &PluginVersion) -> bool {
        *host >= self.minimum && *host <= self.effective_maximum()
    }
}

/// Which flagged plugins the host shows.
///
/// Experimental and deprecated plugins are hidden by default; the registry
/// UI exposes toggles for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityPolicy {
    pub show_experimental: bool,
    pub show_deprecated: bool,
}

impl VisibilityPolicy {
    /// True when the policy allows this plugin to be listed.
    pub fn is_visible(&self, metadata: &PluginMetadata) -> bool {
        (!metadata.experimental || self.show_experimental)
            && (!metadata.deprecated || self.show_deprecated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PluginVersion {
        s.parse().unwrap()
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = CompatibilityWindow::new(v("2.0"), Some(v("2.99")));
        assert!(window.contains(&v("2.0")));
        assert!(window.contains(&v("2.18.3")));
        assert!(window.contains(&v("2.99")));
        assert!(!window.contains(&v("1.8")));
        assert!(!window.contains(&v("3.0")));
    }

    #[test]
    fn missing_maximum_defaults_to_major_99() {
        let window = CompatibilityWindow::new(v("3.4"), None);
        assert_eq!(window.effective_maximum(), v("3.99.99"));
        assert!(window.contains(&v("3.4")));
        assert!(window.contains(&v("3.99")));
        assert!(!window.contains(&v("4.0")));
        assert!(!window.contains(&v("3.2")));
    }

    #[test]
    fn default_policy_hides_flagged_plugins() {
        let mut metadata = test_metadata();
        let policy = VisibilityPolicy::default();
        assert!(policy.is_visible(&metadata));

        metadata.experimental = true;
        assert!(!policy.is_visible(&metadata));

        metadata.experimental = false;
        metadata.deprecated = true;
        assert!(!policy.is_visible(&metadata));
    }

    #[test]
    fn policy_toggles_are_independent() {
        let mut metadata = test_metadata();
        metadata.experimental = true;
        metadata.deprecated = true;

        let experimental_only = VisibilityPolicy {
            show_experimental: true,
            show_deprecated: false,
        };
        assert!(!experimental_only.is_visible(&metadata));

        let both = VisibilityPolicy {
            show_experimental: true,
            show_deprecated: true,
        };
        assert!(both.is_visible(&metadata));
    }

    fn test_metadata() -> PluginMetadata {
        let descriptor = pluma_metadata::parse_descriptor(
            "[general]\nname=test\nversion=1.0\nqgisMinimumVersion=3.0\n\
             description=Test plugin\nstatus=final\n",
        )
        .unwrap();
        PluginMetadata::from_descriptor(&descriptor).unwrap()
    }
}
