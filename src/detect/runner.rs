//! Scan runner that dispatches files to the right processor.

use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, trace};

use super::notebook::{process_notebook, NotebookOptions};
use super::patterns::{default_patterns, Pattern};
use super::script::process_script;
use super::{FileError, FileKind, FileResult, PatternSet, ScanResult};
use crate::error::PatternConfigError;

/// Scans files against one immutable pattern set.
pub struct Runner {
    patterns: PatternSet,
    pattern_errors: Vec<PatternConfigError>,
    notebook: NotebookOptions,
    parallel: bool,
}

impl Runner {
    /// Create a runner from raw pattern configuration.
    ///
    /// `defaults` is usually [`default_patterns`]; configuration problems are
    /// kept and attached to every [`ScanResult`] this runner produces.
    pub fn new<S: AsRef<str>>(defaults: &[Pattern], use_defaults: bool, extra: &[S]) -> Self {
        let (patterns, pattern_errors) = PatternSet::build(defaults, use_defaults, extra);
        for err in &pattern_errors {
            debug!(error = %err, "Pattern configuration problem");
        }
        debug!(
            patterns = patterns.len(),
            invalid = patterns.invalid_count(),
            "Built pattern set"
        );
        Self {
            patterns,
            pattern_errors,
            notebook: NotebookOptions::default(),
            parallel: false,
        }
    }

    /// Create a runner using the built-in patterns plus `extra`.
    pub fn with_defaults<S: AsRef<str>>(extra: &[S]) -> Self {
        Self::new(&default_patterns(), true, extra)
    }

    /// Create a runner from an already built pattern set.
    pub fn from_pattern_set(patterns: PatternSet) -> Self {
        Self {
            patterns,
            pattern_errors: Vec::new(),
            notebook: NotebookOptions::default(),
            parallel: false,
        }
    }

    /// Set notebook-specific options.
    pub fn notebook_options(mut self, options: NotebookOptions) -> Self {
        self.notebook = options;
        self
    }

    /// Process files on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn pattern_errors(&self) -> &[PatternConfigError] {
        &self.pattern_errors
    }

    /// Scan one file, dispatching on its extension.
    ///
    /// Read and parse failures are recorded on the result, never returned.
    pub fn scan_file(&self, path: &Path) -> FileResult {
        let kind = FileKind::from_path(path);
        let mut result = FileResult::new(path, kind);

        let outcome = match kind {
            FileKind::Script => process_script(path, &self.patterns),
            FileKind::Notebook => process_notebook(path, &self.patterns, self.notebook),
            FileKind::Skipped => {
                trace!(path = %path.display(), "Skipping unsupported file type");
                return result;
            }
        };

        match outcome {
            Ok(findings) => result.findings = findings,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "File not scanned");
                result.error = Some(FileError::from(&e));
            }
        }
        result
    }

    /// Scan every path, keeping results in input order.
    pub fn run<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> ScanResult {
        let files: Vec<FileResult> = if self.parallel {
            paths.par_iter().map(|p| self.scan_file(p.as_ref())).collect()
        } else {
            paths.iter().map(|p| self.scan_file(p.as_ref())).collect()
        };

        let result = ScanResult {
            files,
            pattern_errors: self.pattern_errors.clone(),
        };
        debug!(
            files = result.files.len(),
            findings = result.total_findings(),
            "Scan complete"
        );
        result
    }
}
