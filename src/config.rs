//! Optional YAML configuration for sparkgrep.
//!
//! Every key is optional; command-line flags are merged on top.

use anyhow::{bail, Context};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched for in the current directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["sparkgrep.yaml", ".sparkgrep.yaml", ".sparkgrep.yml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Do not seed the pattern set with the built-in patterns.
    #[serde(default)]
    pub disable_default_patterns: bool,
    /// Extra `regex:description` entries, appended after the defaults.
    #[serde(default)]
    pub additional_patterns: Vec<String>,
    /// Glob patterns for paths to leave out (e.g. `"**/generated/**"`).
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Unreadable or unparseable files fail the run.
    #[serde(default)]
    pub fail_on_error: bool,
    /// Ignore `%magic` and `!shell` lines inside notebook cells.
    #[serde(default)]
    pub skip_magic_lines: bool,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse a config from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.exclude_set()?;
        Ok(config)
    }

    /// Load the config named on the command line, or auto-discover one in `dir`.
    ///
    /// Returns the default config when nothing is found.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            return Ok((Self::parse_file(path)?, Some(path.to_path_buf())));
        }
        match discover(dir) {
            Some(path) => Ok((Self::parse_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Compile the `exclude` globs.
    pub fn exclude_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid exclude glob {:?}", pattern))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Find the first default config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
