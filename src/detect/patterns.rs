//! Pattern definitions and pattern set construction.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::PatternConfigError;

/// Built-in Spark/Databricks debugging actions.
///
/// The collect/count/toPandas entries are anchored at both ends so that
/// `result = df.collect()` is left alone.
const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    (r"^\s*display\s*\(", "display() function call"),
    (r"^\s*\w+\.display\s*\(", ".display() method call"),
    (r"^\s*\w+\.show\s*\(", ".show() method call"),
    (
        r"^\s*\w+\.collect\s*\(\s*\)\s*$",
        ".collect() call without assignment",
    ),
    (
        r"^\s*\w+\.count\s*\(\s*\)\s*$",
        ".count() call without assignment",
    ),
    (
        r"^\s*\w+\.toPandas\s*\(\s*\)\s*$",
        ".toPandas() without assignment",
    ),
    (r"dbutils\.notebook\.exit\s*\(", "dbutils.notebook.exit() call"),
];

/// A regular expression paired with a human description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    pub regex: String,
    pub description: String,
}

impl Pattern {
    pub fn new(regex: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            description: description.into(),
        }
    }

    /// Parse a `regex:description` entry, splitting on the first colon.
    pub fn parse(entry: &str) -> Result<Self, PatternConfigError> {
        match entry.split_once(':') {
            Some((regex, description)) => Ok(Self::new(regex, description)),
            None => Err(PatternConfigError::InvalidFormat {
                entry: entry.to_string(),
            }),
        }
    }
}

/// The built-in pattern list.
pub fn default_patterns() -> Vec<Pattern> {
    DEFAULT_PATTERNS
        .iter()
        .map(|(regex, description)| Pattern::new(*regex, *description))
        .collect()
}

/// A pattern with its compile outcome.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub pattern: Pattern,
    /// `Err` holds the compiler's message; such entries never match.
    pub regex: Result<Regex, String>,
}

impl CompiledPattern {
    /// Compile a pattern case-insensitively.
    pub fn compile(pattern: Pattern) -> Self {
        let regex = RegexBuilder::new(&pattern.regex)
            .case_insensitive(true)
            .build()
            .map_err(|e| e.to_string());
        Self { pattern, regex }
    }

    pub fn is_valid(&self) -> bool {
        self.regex.is_ok()
    }
}

/// Ordered, immutable set of active patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    entries: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Build the active set: defaults first (if enabled), then extras in order.
    ///
    /// Malformed extras are skipped and uncompilable regexes are kept as
    /// inert entries; both are returned as errors so the caller can warn
    /// before scanning.
    pub fn build<S: AsRef<str>>(
        defaults: &[Pattern],
        use_defaults: bool,
        extra: &[S],
    ) -> (Self, Vec<PatternConfigError>) {
        let mut errors = Vec::new();
        let mut patterns = Vec::new();

        if use_defaults {
            patterns.extend(defaults.iter().cloned());
        }

        for entry in extra {
            match Pattern::parse(entry.as_ref()) {
                Ok(p) => patterns.push(p),
                Err(e) => errors.push(e),
            }
        }

        let (set, compile_errors) = Self::compile(patterns);
        errors.extend(compile_errors);
        (set, errors)
    }

    /// Compile an explicit list of patterns.
    pub fn compile(patterns: Vec<Pattern>) -> (Self, Vec<PatternConfigError>) {
        let entries: Vec<CompiledPattern> =
            patterns.into_iter().map(CompiledPattern::compile).collect();

        let errors = entries
            .iter()
            .filter_map(|c| match &c.regex {
                Ok(_) => None,
                Err(reason) => Some(PatternConfigError::InvalidRegex {
                    pattern: c.pattern.regex.clone(),
                    reason: reason.clone(),
                }),
            })
            .collect();

        (Self { entries }, errors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.entries.iter()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.entries.iter().map(|c| &c.pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose regex failed to compile.
    pub fn invalid_count(&self) -> usize {
        self.entries.iter().filter(|c| !c.is_valid()).count()
    }
}
