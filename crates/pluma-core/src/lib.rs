// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pluma plugin toolkit.
//!
//! This crate provides the error type and common types shared by the
//! descriptor loader, host registry, configuration, and CLI crates.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlumaError;
pub use types::{InvalidVersion, PluginVersion, ReleaseStatus};
