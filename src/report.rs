//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Text: the plain report consumed by pre-commit and humans
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::detect::{FileResult, ScanResult};
use crate::error::PatternConfigError;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Exit status for a scan: 1 on any finding, or on any file error when
/// `fail_on_error` is set.
pub fn exit_code(result: &ScanResult, fail_on_error: bool) -> i32 {
    if result.had_issues() || (fail_on_error && result.had_file_errors()) {
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

// =============================================================================
// Text Format
// =============================================================================

/// Render the plain-text report and the exit status.
///
/// Files without findings produce no output; a clean scan renders as an
/// empty string.
pub fn render(result: &ScanResult, fail_on_error: bool) -> (String, i32) {
    (format_text(result, false), exit_code(result, fail_on_error))
}

/// The text report layout, optionally styled for a terminal.
fn format_text(result: &ScanResult, color: bool) -> String {
    let mut out = String::new();

    for file in result.files.iter().filter(|f| f.has_findings()) {
        if !out.is_empty() {
            out.push('\n');
        }
        write_file_section(&mut out, file, color);
    }

    let total = result.total_findings();
    if total > 0 {
        out.push('\n');
        let summary = paint(color, summary_line(total), |s| s.red().bold());
        let _ = writeln!(out, "{}", summary);
    }

    out
}

fn write_file_section(out: &mut String, file: &FileResult, color: bool) {
    let header = paint(color, format!("{}:", file.path.display()), |s| s.bold());
    let _ = writeln!(out, "{}", header);
    for finding in &file.findings {
        let location = paint(color, finding.location.to_string(), |s| s.cyan());
        let _ = writeln!(out, "  {}: {}", location, finding.description);
        let marker = paint(color, ">".to_string(), |s| s.dimmed());
        let _ = writeln!(out, "    {} {}", marker, finding.text);
    }
}

fn paint(color: bool, text: String, style: fn(ColoredString) -> ColoredString) -> String {
    if color {
        style(text.as_str().normal()).to_string()
    } else {
        text
    }
}

fn summary_line(total: usize) -> String {
    format!("Found {} issue(s)", total)
}

/// Warning lines for pattern configuration problems.
pub fn pattern_warnings(errors: &[PatternConfigError]) -> Vec<String> {
    errors.iter().map(|e| format!("Warning: {}", e)).collect()
}

/// Warning lines for files that could not be read or parsed.
pub fn file_warnings(result: &ScanResult) -> Vec<String> {
    result
        .files
        .iter()
        .filter_map(|f| f.error.as_ref())
        .map(|e| format!("Warning: {}", e.message))
        .collect()
}

/// All warnings for a scan, pattern problems first.
pub fn render_warnings(result: &ScanResult) -> Vec<String> {
    let mut warnings = pattern_warnings(&result.pattern_errors);
    warnings.extend(file_warnings(result));
    warnings
}

/// Write the text report to stdout, coloured when enabled.
pub fn write_text(result: &ScanResult) {
    print!("{}", format_text(result, true));
}

/// Write warning lines to stderr.
pub fn write_warnings(warnings: &[String]) {
    for warning in warnings {
        match warning.strip_prefix("Warning:") {
            Some(rest) => eprintln!("{}{}", "Warning:".yellow(), rest),
            None => eprintln!("{}", warning),
        }
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files_scanned: usize,
    pub total_issues: usize,
    pub had_issues: bool,
    pub exit_code: i32,
    pub files: Vec<JsonFile>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Per-file entry; only files with findings or errors are listed.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFile {
    pub path: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub findings: Vec<JsonFinding>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<usize>,
    pub line: usize,
    pub description: String,
    pub text: String,
}

/// Build the JSON report structure.
pub fn build_json(result: &ScanResult, fail_on_error: bool) -> JsonReport {
    let files = result
        .files
        .iter()
        .filter(|f| f.has_findings() || f.error.is_some())
        .map(|f| JsonFile {
            path: f.path.display().to_string(),
            kind: f.kind.as_str().to_string(),
            error: f.error.as_ref().map(|e| e.message.clone()),
            findings: f
                .findings
                .iter()
                .map(|finding| JsonFinding {
                    cell: finding.location.cell(),
                    line: finding.location.line(),
                    description: finding.description.clone(),
                    text: finding.text.clone(),
                })
                .collect(),
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_scanned: result.scanned(),
        total_issues: result.total_findings(),
        had_issues: result.had_issues(),
        exit_code: exit_code(result, fail_on_error),
        files,
        warnings: render_warnings(result),
    }
}

/// Render the pretty-printed JSON report.
pub fn render_json(result: &ScanResult, fail_on_error: bool) -> anyhow::Result<String> {
    let report = build_json(result, fail_on_error);
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write results in JSON format.
pub fn write_json(result: &ScanResult, fail_on_error: bool) -> anyhow::Result<()> {
    println!("{}", render_json(result, fail_on_error)?);
    Ok(())
}
