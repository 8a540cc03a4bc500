// SPDX-FileCopyrightText: 2026 Pluma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor error types with miette diagnostics.
//!
//! Parse errors carry source spans pointing at the offending line so the CLI
//! can render Elm-style reports. Missing mandatory keys get "looks like a
//! misspelling" suggestions via Jaro-Winkler string similarity.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a near-miss key.
/// 0.75 catches common typos like `qgisMinimumVesion` -> `qgisMinimumVersion`
/// while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// An error loading, parsing, or validating a plugin descriptor.
///
/// The loader surfaces two failure families (missing file, malformed
/// syntax); the remaining variants come from descriptor validation and are
/// collected rather than failing fast.
#[derive(Debug, Error, Diagnostic)]
pub enum MetadataError {
    /// The descriptor file does not exist.
    #[error("descriptor not found: {}", path.display())]
    #[diagnostic(
        code(pluma::metadata::not_found),
        help("check that the plugin directory contains a metadata.txt file")
    )]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The descriptor file exists but could not be read.
    #[error("failed to read descriptor {}: {source}", path.display())]
    #[diagnostic(code(pluma::metadata::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line matched neither comment, blank, section header, nor key=value.
    #[error("syntax error: {message}")]
    #[diagnostic(code(pluma::metadata::syntax))]
    Syntax {
        /// What was wrong with the line.
        message: String,
        /// Source span for the offending line.
        #[label("here")]
        span: Option<SourceSpan>,
        /// The descriptor content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key appeared twice within one section.
    #[error("duplicate key `{key}` in section [{section}]")]
    #[diagnostic(
        code(pluma::metadata::duplicate_key),
        help("keys must be unique within a section; remove one of the definitions")
    )]
    DuplicateKey {
        key: String,
        section: String,
        #[label("redefined here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A mandatory key is absent from the [general] section.
    #[error("missing mandatory key `{key}` in section [general]")]
    #[diagnostic(
        code(pluma::metadata::missing_key),
        help("{}", format_missing_key_help(key, suggestion.as_deref()))
    )]
    MissingKey {
        /// The mandatory key that was not found.
        key: String,
        /// A present key that looks like a misspelling of it, if any.
        suggestion: Option<String>,
    },

    /// A key is present but its value does not parse.
    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(
        code(pluma::metadata::invalid_value),
        help("expected {expected}")
    )]
    InvalidValue {
        /// The key with the bad value.
        key: String,
        /// Description of the problem.
        detail: String,
        /// What a valid value looks like.
        expected: String,
    },

    /// A structural validation failure not tied to a single key.
    #[error("validation error: {message}")]
    #[diagnostic(code(pluma::metadata::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Format the help message for missing mandatory key errors.
fn format_missing_key_help(key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(near) => format!("`{near}` looks like a misspelling of `{key}`"),
        None => format!("add `{key}=<value>` to the [general] section"),
    }
}

/// Find a present key that resembles an expected key using Jaro-Winkler
/// string similarity.
///
/// Returns the closest match above the similarity threshold, or `None` if
/// nothing present is close enough.
pub fn suggest_key(expected: &str, present: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &candidate in present {
        let score = strsim::jaro_winkler(expected, candidate);
        if score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

/// Render a list of `MetadataError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[MetadataError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_misspelled_minimum_version() {
        let present = &["name", "version", "qgisMinimumVesion"];
        assert_eq!(
            suggest_key("qgisMinimumVersion", present),
            Some("qgisMinimumVesion".to_string())
        );
    }

    #[test]
    fn no_suggestion_when_nothing_is_close() {
        let present = &["changelog", "tags", "homepage"];
        assert_eq!(suggest_key("name", present), None);
    }

    #[test]
    fn missing_key_help_with_suggestion_names_both_keys() {
        let help = format_missing_key_help("name", Some("naem"));
        assert!(help.contains("naem"));
        assert!(help.contains("name"));
    }

    #[test]
    fn not_found_displays_the_path() {
        let err = MetadataError::NotFound {
            path: "/plugins/inasafe/metadata.txt".into(),
        };
        assert!(err.to_string().contains("/plugins/inasafe/metadata.txt"));
    }
}
