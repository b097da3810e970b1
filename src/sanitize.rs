//! Text normalization applied before any structural matching.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+\n").expect("valid trailing space regex"));
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank run regex"));

/// Normalize extracted text.
///
/// Removes carriage returns, strips whitespace at the end of each line,
/// collapses three or more consecutive newlines to a single blank line, and
/// trims the result. Sanitizing sanitized text is a no-op.
///
/// ```rust
/// use pasal::sanitize;
///
/// assert_eq!(sanitize("BAB I  \r\n\r\n\r\n\r\nIsi  "), "BAB I\n\nIsi");
/// assert_eq!(sanitize(""), "");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = text.replace('\r', "");
    let text = TRAILING_SPACE.replace_all(&text, "\n");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}
