//! Operand text validation.

use regex::Regex;
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("number pattern is a valid regex")
});

/// Strips surrounding whitespace, including a byte order mark.
pub fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Returns `true` if `text` is a plain signed decimal number.
///
/// Surrounding whitespace is ignored. Exponents, thousands separators and a
/// leading `+` are all rejected, as is an empty or blank string.
///
/// # Examples
///
/// ```
/// use tcalc::domain::is_valid_number;
///
/// assert!(is_valid_number("-2.5"));
/// assert!(is_valid_number(" .5 "));
/// assert!(!is_valid_number("1e5"));
/// ```
pub fn is_valid_number(text: &str) -> bool {
    let trimmed = trim_input(text);
    !trimmed.is_empty() && NUMBER_PATTERN.is_match(trimmed)
}
