// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pluma show` command implementation.
//!
//! Parses one descriptor and prints its typed metadata, either
//! human-readable or as JSON. Problems are rendered as miette diagnostics.

use std::path::Path;

use pluma_core::PlumaError;
use pluma_metadata::{load_descriptor, render_errors, PluginMetadata, METADATA_FILE};

/// Run the `pluma show` command.
///
/// Accepts either a `metadata.txt` path or a plugin directory containing
/// one. Returns `Ok(false)` when the descriptor fails to load or validate.
pub fn run_show(path: &Path, json: bool) -> Result<bool, PlumaError> {
    let descriptor_path = if path.is_dir() {
        path.join(METADATA_FILE)
    } else {
        path.to_path_buf()
    };

    let descriptor = match load_descriptor(&descriptor_path) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            render_errors(&[e]);
            return Ok(false);
        }
    };

    let metadata = match PluginMetadata::from_descriptor(&descriptor) {
        Ok(metadata) => metadata,
        Err(errors) => {
            render_errors(&errors);
            return Ok(false);
        }
    };

    if json {
        let payload = serde_json::json!({
            "metadata": metadata,
            "descriptor": descriptor,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(true);
    }

    println!();
    println!("  {} {} ({})", metadata.name, metadata.version, metadata.status);
    println!("  {}", metadata.description);
    println!();

    let maximum = metadata
        .qgis_maximum_version
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unset".to_string());
    print_field("requires host", &format!("{} .. {maximum}", metadata.qgis_minimum_version));

    if let Some(author) = &metadata.author {
        let value = match &metadata.email {
            Some(email) => format!("{author} <{email}>"),
            None => author.clone(),
        };
        print_field("author", &value);
    }
    if !metadata.tag_list().is_empty() {
        print_field("tags", &metadata.tag_list().join(", "));
    }
    for (label, value) in [
        ("homepage", &metadata.homepage),
        ("tracker", &metadata.tracker),
        ("repository", &metadata.repository),
        ("category", &metadata.category),
    ] {
        if let Some(value) = value {
            print_field(label, value);
        }
    }
    print_field(
        "flags",
        &match (metadata.experimental, metadata.deprecated) {
            (true, true) => "experimental, deprecated".to_string(),
            (true, false) => "experimental".to_string(),
            (false, true) => "deprecated".to_string(),
            (false, false) => "none".to_string(),
        },
    );

    if let Some(changelog) = &metadata.changelog {
        println!();
        println!("  changelog:");
        for line in changelog.lines() {
            println!("      {line}");
        }
    }
    println!();

    Ok(true)
}

fn print_field(label: &str, value: &str) {
    println!("  {label:<15} {value}");
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[general]
name=InaSAFE
qgisMinimumVersion=2.0
qgisMaximumVersion=2.99
description=Realistic natural hazard impact scenarios
version=3.1.0
status=alpha
tags=contingency planning, impact assessments
changelog=3.1.0
    - New impact function
";

    #[test]
    fn show_accepts_a_plugin_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(METADATA_FILE), SAMPLE).unwrap();

        assert!(run_show(root.path(), true).unwrap());
    }

    #[test]
    fn show_missing_descriptor_reports_failure() {
        let root = tempfile::tempdir().unwrap();
        let ok = run_show(&root.path().join("metadata.txt"), false).unwrap();
        assert!(!ok);
    }

    #[test]
    fn show_invalid_descriptor_reports_failure() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join(METADATA_FILE);
        std::fs::write(&path, "[general]\nname=broken\n").unwrap();

        let ok = run_show(&path, false).unwrap();
        assert!(!ok);
    }
}
