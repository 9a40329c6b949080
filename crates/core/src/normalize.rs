//! Review text normalization
//!
//! Turns raw user input into the canonical form the vectorizer was fitted
//! on. The step order is fixed: tag stripping must run before punctuation
//! removal (tags are delimited by punctuation characters), and whitespace
//! collapsing runs last so the gaps left by removed substrings close up.

use once_cell::sync::Lazy;
use regex::Regex;

/// HTML-tag-like substrings: `<`…`>`, non-greedy, no nesting awareness.
/// `.` does not cross newlines, so an unterminated tag spanning lines stays.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("static pattern"));

/// Runs of Unicode decimal digits.
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static pattern"));

/// Runs of Unicode whitespace.
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Normalize raw review text into canonical text.
///
/// Lowercases, strips HTML-tag-like substrings, removes ASCII punctuation
/// and digit runs, then collapses whitespace and trims. Total over all
/// inputs (empty in, empty out) and idempotent: canonical text passed back
/// through is returned unchanged.
///
/// # Example
/// ```
/// use veridict_core::normalize;
///
/// assert_eq!(
///     normalize("Great product!! 5/5 <b>AMAZING</b>"),
///     "great product amazing"
/// );
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_tags = HTML_TAG.replace_all(&lowered, "");
    let without_punctuation: String = without_tags
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let without_digits = DIGITS.replace_all(&without_punctuation, "");
    WHITESPACE
        .replace_all(&without_digits, " ")
        .trim()
        .to_string()
}
