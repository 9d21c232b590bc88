//! Detection of leftover debugging actions in scripts and notebooks.

mod files;
mod filter;
mod matcher;
mod notebook;
mod patterns;
mod runner;
mod script;
mod types;

pub use files::collect_files;
pub use filter::{classify_lines, Delimiter, FilterState, LineFilter};
pub use matcher::{match_line, LineMatch};
pub use notebook::{parse_code_cells, process_notebook, scan_cells, CodeCell, NotebookOptions};
pub use patterns::{default_patterns, CompiledPattern, Pattern, PatternSet};
pub use runner::Runner;
pub use script::{process_script, scan_script_source};
pub use types::{FileError, FileKind, FileResult, Finding, Location, ScanResult};
