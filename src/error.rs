//! Recoverable scan errors.
//!
//! None of these abort a scan. Pattern errors drop or disable one pattern,
//! file errors empty one file's result.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A malformed `regex:description` entry or an uncompilable regex.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternConfigError {
    #[error("Invalid pattern format '{entry}' (expected 'pattern:description')")]
    InvalidFormat { entry: String },
    #[error("Invalid regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// Errors that can occur while scanning a single file.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    PatternConfig(#[from] PatternConfigError),
    #[error("Could not read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse notebook {}: {source}", path.display())]
    NotebookParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::PatternConfig(_) => "pattern_config",
            ScanError::FileRead { .. } => "file_read",
            ScanError::NotebookParse { .. } => "notebook_parse",
        }
    }
}
