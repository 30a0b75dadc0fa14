//! Text sanitization utilities for cleaning extracted report fields
//!
//! Every field of a technology record is a single line of text, so the
//! cleanup here is stricter than a generic HTML-to-text pass: invisible
//! characters are dropped and every whitespace run becomes one space.

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize one extracted field value
///
/// This function applies multiple cleaning steps:
/// 1. Remove zero-width characters
/// 2. Remove control characters
/// 3. Collapse whitespace runs (including newlines) to a single space
/// 4. Trim
///
/// # Examples
///
/// ```
/// use techstack::parser::sanitize::sanitize_text;
///
/// let dirty = "  Google\u{200B}   Analytics\n ";
/// assert_eq!(sanitize_text(dirty), "Google Analytics");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let result = remove_zero_width(text);
    let result = remove_control_chars(&result);
    normalize_whitespace(&result).trim().to_string()
}

/// Remove zero-width spaces and similar invisible characters
///
/// Removes:
/// - \u{200B}-\u{200C} Zero-width space and non-joiner
/// - \u{200E}-\u{200F} Direction marks
/// - \u{2028}-\u{202F} Line/paragraph separators and formatting characters
/// - \u{FEFF} Byte order mark (BOM)
///
/// The zero-width joiner (\u{200D}) is kept so emoji sequences survive.
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200C}' |
                '\u{200E}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except whitespace controls
///
/// Newlines and tabs are kept so that [`normalize_whitespace`] can turn them
/// into separators instead of gluing words together.
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect()
}

/// Collapse every whitespace run to a single space
///
/// # Examples
///
/// ```
/// use techstack::parser::sanitize::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("a \n\t b"), "a b");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}

/// Check if text contains meaningful content
///
/// Returns false if text is empty or only whitespace
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Text of an element: its trimmed text nodes concatenated, then sanitized
///
/// Text nodes are joined without a separator, so markup such as
/// `<a>Word<span>Press</span></a>` yields `WordPress`.
pub fn element_text(element: ElementRef<'_>) -> String {
    let joined: String = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    sanitize_text(&joined)
}
