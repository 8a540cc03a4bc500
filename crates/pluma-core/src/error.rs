// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pluma plugin toolkit.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the Pluma registry and host operations.
#[derive(Debug, Error)]
pub enum PlumaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin descriptor could not be loaded or failed validation.
    #[error("metadata error: {message}")]
    Metadata {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested plugin was not found in the registry.
    #[error("plugin not found: {name}")]
    PluginNotFound { name: String },

    /// A plugins directory could not be scanned.
    #[error("failed to scan plugin directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
