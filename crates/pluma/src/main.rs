// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pluma - plugin metadata inspector and registry CLI.
//!
//! This is the binary entry point for the Pluma host tooling.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check;
mod list;
mod show;

/// Pluma - plugin metadata inspector and registry CLI.
#[derive(Parser, Debug)]
#[command(name = "pluma", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover plugins and list the registry.
    List {
        /// Plugins directory to scan (overrides configured directories).
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Include hidden and incompatible plugins.
        #[arg(long)]
        all: bool,
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Show the metadata of a single descriptor file.
    Show {
        /// Path to a metadata.txt file or a plugin directory.
        path: PathBuf,
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Check descriptors for problems.
    Check {
        /// Path to a metadata.txt file, a plugin directory, or a plugins root.
        path: PathBuf,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match pluma_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            pluma_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    // PLUMA_LOG overrides the configured level, matching the config's own
    // env-over-file precedence.
    let filter = EnvFilter::try_from_env("PLUMA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.host.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::List {
            dir,
            all,
            json,
            plain,
        } => list::run_list(&config, dir, all, json, plain),
        Commands::Show { path, json } => show::run_show(&path, json),
        Commands::Check { path, plain } => check::run_check(&config, &path, plain),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("pluma: {e}");
            ExitCode::FAILURE
        }
    }
}
