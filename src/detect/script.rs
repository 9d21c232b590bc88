//! Scanning of plain Python scripts.

use std::path::Path;
use tracing::{debug, trace};

use super::filter::classify_lines;
use super::matcher::match_line;
use super::{Finding, Location, PatternSet};
use crate::error::ScanError;

/// Read a whole file as UTF-8 text.
pub(crate) fn read_source(path: &Path) -> Result<String, ScanError> {
    trace!(path = %path.display(), "Reading file");
    std::fs::read_to_string(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to read file");
        ScanError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Scan a script file for debugging actions.
pub fn process_script(path: &Path, patterns: &PatternSet) -> Result<Vec<Finding>, ScanError> {
    let content = read_source(path)?;
    let findings = scan_script_source(&content, patterns);
    if !findings.is_empty() {
        debug!(path = %path.display(), count = findings.len(), "Found issues");
    }
    Ok(findings)
}

/// Scan script text. Findings are keyed by 1-based physical line.
pub fn scan_script_source(content: &str, patterns: &PatternSet) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, (line, is_code)) in classify_lines(content.lines()).enumerate() {
        if !is_code {
            continue;
        }
        for m in match_line(line, patterns) {
            findings.push(Finding {
                location: Location::Line(idx + 1),
                description: m.description,
                text: m.text,
            });
        }
    }

    findings
}
