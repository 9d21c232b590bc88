//! Comment and docstring filtering.
//!
//! A line-level heuristic, not a tokenizer: `#` comment lines and anything
//! inside a triple-quoted region are non-code, so example snippets in
//! docstrings are never reported. A region opens on a line that starts with
//! a delimiter (a docstring) or ends with one (`query = """`); a delimiter
//! in the middle of a code line, such as `sep = '"""'`, is left alone.

/// A triple-quote delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `"""`
    Double,
    /// `'''`
    Single,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Double => "\"\"\"",
            Delimiter::Single => "'''",
        }
    }

    /// The delimiter a trimmed line opens with: a leading one first, then a
    /// trailing one.
    fn opening(stripped: &str) -> Option<Self> {
        const BOTH: [Delimiter; 2] = [Delimiter::Double, Delimiter::Single];
        BOTH.into_iter()
            .find(|d| stripped.starts_with(d.as_str()))
            .or_else(|| BOTH.into_iter().find(|d| stripped.ends_with(d.as_str())))
    }
}

/// Filter state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Normal,
    InTripleString(Delimiter),
}

/// Stateful code/non-code classifier for one file or one notebook cell.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    state: FilterState,
}

impl LineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Classify the next line. Returns `true` for code lines.
    pub fn is_code(&mut self, line: &str) -> bool {
        match self.state {
            FilterState::InTripleString(delim) => {
                if line.contains(delim.as_str()) {
                    self.state = FilterState::Normal;
                }
                false
            }
            FilterState::Normal => {
                let stripped = line.trim();
                if stripped.is_empty() || stripped.starts_with('#') {
                    return false;
                }
                match Delimiter::opening(stripped) {
                    Some(delim) => {
                        if stripped.matches(delim.as_str()).count() % 2 == 1 {
                            self.state = FilterState::InTripleString(delim);
                        }
                        false
                    }
                    None => true,
                }
            }
        }
    }
}

/// Pair each line with its code classification, starting in `Normal`.
pub fn classify_lines<'a, I>(lines: I) -> impl Iterator<Item = (&'a str, bool)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut filter = LineFilter::new();
    lines.into_iter().map(move |line| (line, filter.is_code(line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_flags(source: &str) -> Vec<bool> {
        classify_lines(source.lines()).map(|(_, code)| code).collect()
    }

    #[test]
    fn test_comments_are_not_code() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("# display(df)"));
        assert!(!filter.is_code("    # indented comment"));
        assert!(!filter.is_code("#"));
        assert!(filter.is_code("text = \"# not a comment\""));
        assert_eq!(filter.state(), FilterState::Normal);
    }

    #[test]
    fn test_blank_lines_are_not_code() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code(""));
        assert!(!filter.is_code(" \t "));
    }

    #[test]
    fn test_multiline_docstring() {
        let source = "def f():\n    \"\"\"Docs.\n    display(df)\n    \"\"\"\n    display(df)\n";
        assert_eq!(code_flags(source), vec![true, false, false, false, true]);
    }

    #[test]
    fn test_single_line_docstring_stays_normal() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("\"\"\"Complete docstring\"\"\""));
        assert_eq!(filter.state(), FilterState::Normal);
        assert!(filter.is_code("df.show()"));
    }

    #[test]
    fn test_single_quote_delimiter() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("'''Start docstring"));
        assert_eq!(
            filter.state(),
            FilterState::InTripleString(Delimiter::Single)
        );
        // The other delimiter does not close the region.
        assert!(!filter.is_code("end with \"\"\""));
        assert_eq!(
            filter.state(),
            FilterState::InTripleString(Delimiter::Single)
        );
        assert!(!filter.is_code("end docstring'''"));
        assert_eq!(filter.state(), FilterState::Normal);
    }

    #[test]
    fn test_assigned_triple_string() {
        let source = "sql = \"\"\"\n    SELECT display(x)\n\"\"\"\ndisplay(df)";
        assert_eq!(code_flags(source), vec![false, false, false, true]);
    }

    #[test]
    fn test_leading_delimiter_opens() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("    '''has \"\"\" inside"));
        assert_eq!(
            filter.state(),
            FilterState::InTripleString(Delimiter::Single)
        );
    }

    #[test]
    fn test_delimiter_inside_code_line_does_not_open() {
        let mut filter = LineFilter::new();
        assert!(filter.is_code("sep = '\"\"\"'"));
        assert!(filter.is_code("text = \"This has \"\"\" inside\""));
        assert!(filter.is_code("print(\"She said \"\"\"hello\"\"\"\")"));
        assert_eq!(filter.state(), FilterState::Normal);
        assert!(filter.is_code("display(df)"));
    }

    #[test]
    fn test_trailing_delimiter_opens() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("query = f'''"));
        assert_eq!(
            filter.state(),
            FilterState::InTripleString(Delimiter::Single)
        );

        let mut filter = LineFilter::new();
        assert!(!filter.is_code("x = \"\"\"a\"\"\""));
        assert_eq!(filter.state(), FilterState::Normal);
    }

    #[test]
    fn test_leading_pair_on_one_line_stays_normal() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("\"\"\"Start\"\"\" # but this continues"));
        assert_eq!(filter.state(), FilterState::Normal);
    }

    #[test]
    fn test_comment_with_quotes_does_not_open() {
        let mut filter = LineFilter::new();
        assert!(!filter.is_code("# comment with \"\"\" quotes"));
        assert_eq!(filter.state(), FilterState::Normal);
    }

    #[test]
    fn test_state_persists_over_blank_and_comment_lines() {
        let source = "\"\"\"\n\n# display(df)\ndisplay(df)\n\"\"\"\ndisplay(df)";
        assert_eq!(
            code_flags(source),
            vec![false, false, false, false, false, true]
        );
    }
}
