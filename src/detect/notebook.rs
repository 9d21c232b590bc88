//! Scanning of Jupyter notebooks.
//!
//! Only the minimal nbformat subset is modelled: a `cells` array whose
//! entries carry a `cell_type` and a `source` that is either one string or
//! a list of strings. Outputs, metadata and kernel info are ignored.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, trace};

use super::filter::LineFilter;
use super::matcher::match_line;
use super::script::read_source;
use super::{Finding, Location, PatternSet};
use crate::error::ScanError;

/// Options that only apply to notebook cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotebookOptions {
    /// Treat `%magic` and `!shell` lines as non-code.
    pub skip_magic_lines: bool,
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Lines(Vec::new())
    }
}

impl CellSource {
    /// Normalize either representation into physical lines.
    fn into_lines(self) -> Vec<String> {
        let text = match self {
            CellSource::Text(text) => text,
            CellSource::Lines(parts) => parts.concat(),
        };
        text.lines().map(str::to_string).collect()
    }
}

/// A code cell with its 1-based position among code cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCell {
    pub index: usize,
    pub lines: Vec<String>,
}

/// Parse notebook JSON and keep only the code cells, numbered 1..N.
pub fn parse_code_cells(content: &str) -> Result<Vec<CodeCell>, serde_json::Error> {
    let notebook: RawNotebook = serde_json::from_str(content)?;
    Ok(notebook
        .cells
        .into_iter()
        .filter(|cell| cell.cell_type == "code")
        .enumerate()
        .map(|(i, cell)| CodeCell {
            index: i + 1,
            lines: cell.source.into_lines(),
        })
        .collect())
}

/// Scan a notebook file for debugging actions.
pub fn process_notebook(
    path: &Path,
    patterns: &PatternSet,
    options: NotebookOptions,
) -> Result<Vec<Finding>, ScanError> {
    let content = read_source(path)?;
    let cells = parse_code_cells(&content).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to parse notebook");
        ScanError::NotebookParse {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    trace!(path = %path.display(), code_cells = cells.len(), "Parsed notebook");

    let findings = scan_cells(&cells, patterns, options);
    if !findings.is_empty() {
        debug!(path = %path.display(), count = findings.len(), "Found issues");
    }
    Ok(findings)
}

/// Scan already-extracted code cells. Filter state resets at every cell.
pub fn scan_cells(
    cells: &[CodeCell],
    patterns: &PatternSet,
    options: NotebookOptions,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for cell in cells {
        let mut filter = LineFilter::new();
        for (idx, line) in cell.lines.iter().enumerate() {
            if !filter.is_code(line) {
                continue;
            }
            if options.skip_magic_lines && is_magic_line(line) {
                continue;
            }
            for m in match_line(line, patterns) {
                findings.push(Finding {
                    location: Location::Cell {
                        cell: cell.index,
                        line: idx + 1,
                    },
                    description: m.description,
                    text: m.text,
                });
            }
        }
    }

    findings
}

/// `%line magic`, `%%cell magic` or `!shell` escape.
fn is_magic_line(line: &str) -> bool {
    let stripped = line.trim_start();
    stripped.starts_with('%') || stripped.starts_with('!')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::patterns::default_patterns;
    use serde_json::json;
    use tempfile::TempDir;

    fn defaults() -> PatternSet {
        PatternSet::compile(default_patterns()).0
    }

    fn write_notebook(dir: &TempDir, name: &str, cells: serde_json::Value) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let notebook = json!({
            "nbformat": 4,
            "nbformat_minor": 4,
            "metadata": {},
            "cells": cells,
        });
        std::fs::write(&path, notebook.to_string()).unwrap();
        path
    }

    #[test]
    fn test_markdown_cells_do_not_consume_index() {
        let temp = TempDir::new().unwrap();
        let path = write_notebook(
            &temp,
            "nb.ipynb",
            json!([
                {"cell_type": "code", "source": ["df = load()\n"]},
                {"cell_type": "markdown", "source": ["display(df) in prose\n"]},
                {"cell_type": "code", "source": ["x = 1\n", "display(df)\n"]},
            ]),
        );

        let findings = process_notebook(&path, &defaults(), NotebookOptions::default()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, Location::Cell { cell: 2, line: 2 });
        assert_eq!(findings[0].text, "display(df)");
    }

    #[test]
    fn test_string_source() {
        let temp = TempDir::new().unwrap();
        let path = write_notebook(
            &temp,
            "nb.ipynb",
            json!([{"cell_type": "code", "source": "x = 1\ndf.show()", "outputs": []}]),
        );

        let findings = process_notebook(&path, &defaults(), NotebookOptions::default()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, Location::Cell { cell: 1, line: 2 });
        assert_eq!(findings[0].description, ".show() method call");
    }

    #[test]
    fn test_filter_resets_per_cell() {
        let cells = vec![
            CodeCell {
                index: 1,
                lines: vec!["\"\"\"unterminated".to_string(), "display(df)".to_string()],
            },
            CodeCell {
                index: 2,
                lines: vec!["display(df)".to_string()],
            },
        ];
        let findings = scan_cells(&cells, &defaults(), NotebookOptions::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, Location::Cell { cell: 2, line: 1 });
    }

    #[test]
    fn test_magic_lines() {
        let cells = vec![CodeCell {
            index: 1,
            lines: vec!["%sql".to_string(), "display(df)".to_string()],
        }];
        let (set, _) = PatternSet::build(&default_patterns(), true, &["^%sql:sql magic"]);

        let findings = scan_cells(&cells, &set, NotebookOptions::default());
        assert_eq!(findings.len(), 2);

        let findings = scan_cells(
            &cells,
            &set,
            NotebookOptions {
                skip_magic_lines: true,
            },
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].description, "display() function call");
    }

    #[test]
    fn test_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ipynb");
        std::fs::write(&path, "{ invalid json content").unwrap();

        let err = process_notebook(&path, &defaults(), NotebookOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotebookParse { .. }));
    }

    #[test]
    fn test_wrong_structure() {
        assert!(parse_code_cells("[1, 2, 3]").is_err());
        assert!(parse_code_cells(r#"{"cells": "nope"}"#).is_err());
        assert!(parse_code_cells(r#"{"cells": [{"cell_type": "code", "source": 5}]}"#).is_err());
    }

    #[test]
    fn test_missing_cells_and_source() {
        assert!(parse_code_cells(r#"{"metadata": {}}"#).unwrap().is_empty());

        let cells = parse_code_cells(r#"{"cells": [{"cell_type": "code"}]}"#).unwrap();
        assert_eq!(cells.len(), 1);
        assert!(cells[0].lines.is_empty());
    }

    #[test]
    fn test_list_source_joins_fragments() {
        let cells = parse_code_cells(
            r#"{"cells": [{"cell_type": "code", "source": ["df.", "show()\n", "x = 1"]}]}"#,
        )
        .unwrap();
        assert_eq!(cells[0].lines, vec!["df.show()".to_string(), "x = 1".to_string()]);
    }
}
