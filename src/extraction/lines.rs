//! Line splitting and whitespace normalization

/// Split raw document text into trimmed lines, keeping blank lines so that
/// positions still follow the source document.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).collect()
}

/// Collapse every run of whitespace inside a line to a single space and trim
/// the ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join lines with a newline, dropping nothing
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
