//! All error types for the locsync crate.
//!
//! Every fatal condition from the synchronization pipeline surfaces here:
//! malformed input lines, cross-locale key divergence, extraction runaway,
//! and unresolved lookups during source rewriting. None of these are
//! retried; they indicate input or configuration that must be corrected.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use thiserror::Error;

/// Per-file sets of full keys missing relative to the union across locales.
///
/// Keyed by `<lang>/<file name>`, e.g. `"fr/Localizable.strings"`.
pub type DivergenceDiff = BTreeMap<String, BTreeSet<String>>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("malformed line {line_number} in {}: {reason}: {line}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("localization key sets diverge: {}", divergence_summary(.diff))]
    KeyDivergence { diff: DivergenceDiff },

    #[error("extraction retry ceiling exceeded in {}: {line}", .path.display())]
    RetryCeilingExceeded { path: PathBuf, line: String },

    #[error("no key assigned for value \"{value}\" while rewriting {}", .path.display())]
    UnresolvedValue { path: PathBuf, value: String },

    #[error("not a recognized source path: {0}")]
    InvalidSourcePath(String),

    #[error("not a locale folder: {0}")]
    InvalidLocaleFolder(String),

    #[error("invalid table: {0}")]
    InvalidTable(String),

    #[error("translation failed: {0}")]
    Translation(String),
}

impl Error {
    /// Creates a malformed-line error for the given file position.
    pub fn malformed_line(
        path: impl Into<PathBuf>,
        line_number: usize,
        line: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedLine {
            path: path.into(),
            line_number,
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-table error.
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Error::InvalidTable(message.into())
    }
}

fn divergence_summary(diff: &DivergenceDiff) -> String {
    diff.iter()
        .map(|(path, keys)| {
            format!(
                "{} is missing {{{}}}",
                path,
                keys.iter().cloned().collect::<Vec<_>>().join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_malformed_line_error() {
        let error = Error::malformed_line("fr.lproj/Localizable.strings", 3, "\"a\" = b;", "missing value quotes");
        let display = error.to_string();
        assert!(display.contains("line 3"));
        assert!(display.contains("fr.lproj/Localizable.strings"));
        assert!(display.contains("missing value quotes"));
    }

    #[test]
    fn test_key_divergence_error_lists_each_file() {
        let mut diff = DivergenceDiff::new();
        diff.insert(
            "fr/Localizable.strings".to_string(),
            ["Home.String_2".to_string()].into_iter().collect(),
        );
        let error = Error::KeyDivergence { diff };
        let display = error.to_string();
        assert!(display.contains("fr/Localizable.strings"));
        assert!(display.contains("Home.String_2"));
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_unresolved_value_error() {
        let error = Error::UnresolvedValue {
            path: PathBuf::from("Views/Home.swift"),
            value: "Hi".to_string(),
        };
        assert!(error.to_string().contains("\"Hi\""));
        assert!(error.to_string().contains("Views/Home.swift"));
    }

    #[test]
    fn test_error_display_non_empty() {
        let errors = vec![
            Error::InvalidSourcePath("a.txt".to_string()),
            Error::InvalidLocaleFolder("misc".to_string()),
            Error::invalid_table("missing [key] column"),
            Error::Translation("empty response".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
