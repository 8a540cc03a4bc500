// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor loader for QGIS-style plugin `metadata.txt` files.
//!
//! The format is INI-style UTF-8 text: `[section]` headers, `key=value`
//! lines, `#` comments, and indented continuation lines for multi-line
//! values such as `changelog`. Parsing is a single synchronous
//! read-and-parse with no partial-success mode: a descriptor either loads
//! completely or the caller gets an error.
//!
//! # Usage
//!
//! ```no_run
//! use pluma_metadata::{load_descriptor, PluginMetadata};
//!
//! let descriptor = load_descriptor("plugins/inasafe/metadata.txt")?;
//! let metadata = PluginMetadata::from_descriptor(&descriptor)
//!     .map_err(|errors| errors.into_iter().next().expect("non-empty"))?;
//! println!("{} {}", metadata.name, metadata.version);
//! # Ok::<(), pluma_metadata::MetadataError>(())
//! ```

pub mod descriptor;
pub mod diagnostic;
pub mod parser;
pub mod plugin;
pub mod validation;

pub use descriptor::{Descriptor, GENERAL_SECTION};
pub use diagnostic::{render_errors, suggest_key, MetadataError};
pub use parser::{load_descriptor, parse_descriptor};
pub use plugin::{parse_flag, PluginMetadata, KNOWN_KEYS};
pub use validation::{validate_descriptor, MANDATORY_KEYS};

/// Conventional descriptor file name inside a plugin directory.
pub const METADATA_FILE: &str = "metadata.txt";
