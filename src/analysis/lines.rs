//! Mapping matched text back to source lines.
//!
//! Resolution is a plain "first line containing the literal" search. When the
//! same text also appears earlier (in a comment, a string, another scope) the
//! earlier line is reported.

/// Return the 1-based line of the first line containing `literal`, or 0.
pub fn find_line(content: &str, literal: &str) -> usize {
    if literal.is_empty() {
        return 0;
    }
    content
        .lines()
        .position(|line| line.contains(literal))
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

/// Literal used to locate a regex match: the first line of the trimmed match.
pub fn match_literal(matched: &str) -> &str {
    matched.trim().lines().next().unwrap_or("").trim_end()
}
