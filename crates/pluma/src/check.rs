// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pluma check` command implementation.
//!
//! Runs diagnostic checks against one descriptor, a plugin directory, or a
//! whole plugins root, printing a pass/warn/fail line per check and
//! rendering collected diagnostics afterwards.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use pluma_config::PlumaConfig;
use pluma_core::{PluginVersion, PlumaError};
use pluma_metadata::{
    load_descriptor, render_errors, validate_descriptor, MetadataError, PluginMetadata,
    METADATA_FILE,
};
use pluma_registry::CompatibilityWindow;

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    message: String,
}

/// Run the `pluma check` command.
///
/// Returns `Ok(false)` when any check fails; warnings alone do not fail
/// the command.
pub fn run_check(config: &PlumaConfig, path: &Path, plain: bool) -> Result<bool, PlumaError> {
    let host: PluginVersion = config
        .host
        .version
        .parse()
        .map_err(|e| PlumaError::Config(format!("host.version: {e}")))?;

    let use_color = !plain && std::io::stdout().is_terminal();
    let targets = resolve_targets(path)?;

    let mut fail_count = 0;
    let mut warn_count = 0;

    for target in &targets {
        let (results, diagnostics) = check_descriptor(target, &host);

        println!();
        println!("  {}", target.display());
        println!("  {}", "-".repeat(50));
        for result in &results {
            match result.status {
                CheckStatus::Fail => fail_count += 1,
                CheckStatus::Warn => warn_count += 1,
                CheckStatus::Pass => {}
            }
            println!("{}", format_check_line(result, use_color));
        }
        println!();

        if !diagnostics.is_empty() {
            render_errors(&diagnostics);
        }
    }

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(fail_count == 0)
}

/// Expand the argument into descriptor paths to check.
///
/// A file is checked directly; a plugin directory contributes its
/// `metadata.txt`; any other directory is treated as a plugins root and
/// every candidate subdirectory is checked.
fn resolve_targets(path: &Path) -> Result<Vec<PathBuf>, PlumaError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.join(METADATA_FILE).is_file() {
        return Ok(vec![path.join(METADATA_FILE)]);
    }
    if path.is_dir() {
        let mut targets = Vec::new();
        let read_dir = std::fs::read_dir(path).map_err(|e| PlumaError::Discovery {
            path: path.to_path_buf(),
            source: e,
        })?;
        for entry in read_dir {
            let entry = entry.map_err(|e| PlumaError::Discovery {
                path: path.to_path_buf(),
                source: e,
            })?;
            let candidate = entry.path().join(METADATA_FILE);
            if candidate.is_file() {
                targets.push(candidate);
            }
        }
        if targets.is_empty() {
            return Err(PlumaError::Config(format!(
                "no descriptors found under {}",
                path.display()
            )));
        }
        targets.sort();
        return Ok(targets);
    }
    // Nonexistent path: let the loader produce its NotFound diagnostic.
    Ok(vec![path.to_path_buf()])
}

fn check_descriptor(
    path: &Path,
    host: &PluginVersion,
) -> (Vec<CheckResult>, Vec<MetadataError>) {
    let mut results = Vec::new();
    let mut diagnostics = Vec::new();

    let descriptor = match load_descriptor(path) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            results.push(CheckResult {
                name: "descriptor",
                status: CheckStatus::Fail,
                message: "could not be loaded".to_string(),
            });
            diagnostics.push(e);
            return (results, diagnostics);
        }
    };
    let section_word = if descriptor.len() == 1 { "section" } else { "sections" };
    results.push(CheckResult {
        name: "descriptor",
        status: CheckStatus::Pass,
        message: format!("parsed {} {section_word}", descriptor.len()),
    });

    match validate_descriptor(&descriptor) {
        Ok(()) => results.push(CheckResult {
            name: "mandatory keys",
            status: CheckStatus::Pass,
            message: "all present".to_string(),
        }),
        Err(errors) => {
            let problem_word = if errors.len() == 1 { "problem" } else { "problems" };
            results.push(CheckResult {
                name: "mandatory keys",
                status: CheckStatus::Fail,
                message: format!("{} {problem_word}", errors.len()),
            });
            diagnostics.extend(errors);
        }
    }

    // Compatibility and flags only make sense once typed extraction works;
    // its errors were already collected by the strict validation above.
    if let Ok(metadata) = PluginMetadata::from_descriptor(&descriptor) {
        let window = CompatibilityWindow::from_metadata(&metadata);
        let maximum = window.effective_maximum();
        if window.contains(host) {
            results.push(CheckResult {
                name: "compatibility",
                status: CheckStatus::Pass,
                message: format!("{} .. {maximum}", metadata.qgis_minimum_version),
            });
        } else {
            results.push(CheckResult {
                name: "compatibility",
                status: CheckStatus::Warn,
                message: format!(
                    "host {host} outside {} .. {maximum}",
                    metadata.qgis_minimum_version
                ),
            });
        }

        let (status, message) = match (metadata.experimental, metadata.deprecated) {
            (_, true) => (CheckStatus::Warn, "plugin is deprecated".to_string()),
            (true, false) => (CheckStatus::Warn, "plugin is experimental".to_string()),
            (false, false) => (CheckStatus::Pass, "none".to_string()),
        };
        results.push(CheckResult {
            name: "flags",
            status,
            message,
        });
    }

    (results, diagnostics)
}

fn format_check_line(result: &CheckResult, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        let symbol = match result.status {
            CheckStatus::Pass => "✓".green().to_string(),
            CheckStatus::Warn => "!".yellow().to_string(),
            CheckStatus::Fail => "✗".red().to_string(),
        };
        format!("    {symbol} {:<16} {}", result.name, result.message)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<16} {}", result.name, result.message)
    }
}
