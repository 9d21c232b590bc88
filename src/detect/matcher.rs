//! Matching a single line against the active pattern set.

use super::PatternSet;

/// A pattern that matched a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub description: String,
    /// The line with surrounding whitespace removed.
    pub text: String,
}

/// Test every pattern against `line`, in set order.
///
/// Patterns search the raw line; anchoring is up to the regex itself.
/// Entries whose regex failed to compile never match.
pub fn match_line(line: &str, patterns: &PatternSet) -> Vec<LineMatch> {
    patterns
        .iter()
        .filter_map(|p| match &p.regex {
            Ok(regex) if regex.is_match(line) => Some(LineMatch {
                description: p.pattern.description.clone(),
                text: line.trim().to_string(),
            }),
            _ => None,
        })
        .collect()
}
