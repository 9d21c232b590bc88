//! Core types for scan results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PatternConfigError, ScanError};

/// Where a finding was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// 1-based physical line of a script.
    Line(usize),
    /// 1-based index among code cells, 1-based line within that cell.
    Cell { cell: usize, line: usize },
}

impl Location {
    /// The line number, relative to the file or to the cell.
    pub fn line(&self) -> usize {
        match self {
            Location::Line(line) => *line,
            Location::Cell { line, .. } => *line,
        }
    }

    /// The code-cell index for notebook locations.
    pub fn cell(&self) -> Option<usize> {
        match self {
            Location::Line(_) => None,
            Location::Cell { cell, .. } => Some(*cell),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Line(line) => write!(f, "Line {}", line),
            Location::Cell { cell, line } => write!(f, "Cell {}, Line {}", cell, line),
        }
    }
}

/// One match of one pattern against one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub location: Location,
    pub description: String,
    /// The matched line with surrounding whitespace removed.
    pub text: String,
}

/// How a file was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Script,
    Notebook,
    /// Extension not handled; the file was not read.
    Skipped,
}

impl FileKind {
    /// Classify a path by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("py") {
            FileKind::Script
        } else if ext.eq_ignore_ascii_case("ipynb") {
            FileKind::Notebook
        } else {
            FileKind::Skipped
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Script => "script",
            FileKind::Notebook => "notebook",
            FileKind::Skipped => "skipped",
        }
    }
}

/// A per-file error, detached from its source so results stay comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub kind: String,
    pub message: String,
}

impl From<&ScanError> for FileError {
    fn from(err: &ScanError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Findings for one input path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub kind: FileKind,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FileError>,
}

impl FileResult {
    pub fn new<P: Into<PathBuf>>(path: P, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            kind,
            findings: Vec::new(),
            error: None,
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Results of one scan, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub files: Vec<FileResult>,
    /// Problems found while building the pattern set.
    #[serde(default)]
    pub pattern_errors: Vec<PatternConfigError>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any file has at least one finding.
    pub fn had_issues(&self) -> bool {
        self.files.iter().any(FileResult::has_findings)
    }

    /// Total number of findings across all files.
    pub fn total_findings(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    /// True when any file could not be read or parsed.
    pub fn had_file_errors(&self) -> bool {
        self.files.iter().any(|f| f.error.is_some())
    }

    /// Number of files that were actually read.
    pub fn scanned(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.kind != FileKind::Skipped && f.error.is_none())
            .count()
    }
}
