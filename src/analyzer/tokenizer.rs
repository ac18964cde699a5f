//! Whitespace tokenizer for nm record lines

/// Split a record line into its non-empty whitespace-separated fields.
///
/// Runs of spaces, tabs and a trailing newline never produce empty tokens.
///
/// # Examples
///
/// ```
/// use gosize::analyzer::tokenize;
///
/// assert_eq!(
///     tokenize("1001640         96 T _x_cgo_callers\n"),
///     vec!["1001640", "96", "T", "_x_cgo_callers"]
/// );
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
