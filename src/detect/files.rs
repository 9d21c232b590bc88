//! Expansion of input paths into the list of files to scan.

use globset::GlobSet;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

use super::FileKind;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["__pycache__", "node_modules", "venv", "site-packages"];

/// Expand `inputs` into files, in input order.
///
/// Explicit file paths are kept as given (even when missing, so the read
/// error is reported). Directories are walked recursively in name order,
/// keeping only scripts and notebooks. Paths matching `exclude` are dropped.
pub fn collect_files(inputs: &[PathBuf], exclude: &GlobSet) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if is_excluded(input, exclude) {
            trace!(path = %input.display(), "Excluded by config");
            continue;
        }
        if input.is_dir() {
            files.extend(walk_dir(input, exclude));
        } else {
            files.push(input.clone());
        }
    }

    files
}

fn walk_dir(root: &Path, exclude: &GlobSet) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Hidden dirs include .git, .venv and .ipynb_checkpoints
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if FileKind::from_path(path) == FileKind::Skipped || is_excluded(path, exclude) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files
}

fn is_excluded(path: &Path, exclude: &GlobSet) -> bool {
    !exclude.is_empty() && exclude.is_match(path)
}
