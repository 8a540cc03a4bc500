// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pluma list` command implementation.
//!
//! Discovers plugins in the configured directories (or a `--dir` override)
//! and prints the registry. Hidden and incompatible plugins are omitted
//! unless `--all` is passed.

use std::io::IsTerminal;
use std::path::PathBuf;

use pluma_config::PlumaConfig;
use pluma_core::{PluginVersion, PlumaError};
use pluma_registry::{discover_plugins, DiscoveryReport, PluginEntry, PluginStatus, VisibilityPolicy};

/// Run the `pluma list` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub fn run_list(
    config: &PlumaConfig,
    dir: Option<PathBuf>,
    all: bool,
    json: bool,
    plain: bool,
) -> Result<bool, PlumaError> {
    let host: PluginVersion = config
        .host
        .version
        .parse()
        .map_err(|e| PlumaError::Config(format!("host.version: {e}")))?;

    let dirs: Vec<PathBuf> = match dir {
        Some(dir) => vec![dir],
        None => config.plugins.directories.iter().map(PathBuf::from).collect(),
    };
    if dirs.is_empty() {
        return Err(PlumaError::Config(
            "no plugin directories configured; pass --dir or set plugins.directories".to_string(),
        ));
    }

    let policy = VisibilityPolicy {
        show_experimental: config.visibility.show_experimental,
        show_deprecated: config.visibility.show_deprecated,
    };

    let mut reports: Vec<DiscoveryReport> = Vec::new();
    for dir in &dirs {
        reports.push(discover_plugins(dir, &host)?);
    }

    let mut entries: Vec<&PluginEntry> = Vec::new();
    for report in &reports {
        if all {
            entries.extend(report.registry.list_all());
        } else {
            entries.extend(report.registry.get_visible(policy));
        }
    }
    entries.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));

    let failure_count: usize = reports.iter().map(|r| r.failures.len()).sum();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(true);
    }

    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    if entries.is_empty() {
        println!("  no plugins found.");
    }
    for entry in &entries {
        println!("{}", format_row(entry, use_color));
    }
    println!();

    let plugin_word = if entries.len() == 1 { "plugin" } else { "plugins" };
    println!("  {} {plugin_word} listed.", entries.len());
    if failure_count > 0 {
        let plural = if failure_count == 1 { "plugin" } else { "plugins" };
        println!("  {failure_count} {plural} failed to load; run `pluma check` for details.");
    }
    println!();

    Ok(true)
}

fn format_row(entry: &PluginEntry, use_color: bool) -> String {
    let version = entry.metadata.version.to_string();
    let status = if use_color {
        use colored::Colorize;
        match entry.status {
            PluginStatus::Enabled => "enabled".green().to_string(),
            PluginStatus::Disabled => "disabled".yellow().to_string(),
            PluginStatus::Incompatible => "incompatible".red().to_string(),
        }
    } else {
        entry.status.to_string()
    };
    format!(
        "  {status:<12} {:<24} {version:<10} {}",
        entry.metadata.name, entry.metadata.description
    )
}
