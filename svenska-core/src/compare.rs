//! String comparison rules used when grading answers.

/// Splits an endings string into its tokens. Dashes and whitespace are
/// interchangeable separators and empty tokens are dropped, so `"-en -ar"`,
/// `"en ar"` and `"-en--ar"` all yield `["en", "ar"]`.
fn ending_tokens(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Compares two endings strings token by token, ignoring case and the
/// placement of dashes and whitespace.
pub fn compare_endings(expected: &str, actual: &str) -> bool {
    ending_tokens(expected).eq(ending_tokens(actual))
}

/// Translation equality: surrounding whitespace and case are ignored.
pub fn answers_match(expected: &str, actual: &str) -> bool {
    expected.trim().to_lowercase() == actual.trim().to_lowercase()
}
