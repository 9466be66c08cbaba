//! Keyword relevance filter.
//!
//! Exact, case-insensitive substring matching only. A multi-word keyword also
//! matches when at least 70% of its words appear somewhere in the text.

use crate::types::BODY_SNIPPET_CHARS;

/// Fraction of keyword words that must appear for a partial match.
pub const MULTI_WORD_MATCH_RATIO: f64 = 0.7;

/// Returns `true` if `text` is on-topic for `keyword`.
///
/// Empty text is never relevant.
#[must_use]
pub fn is_relevant(text: &str, keyword: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let text_lower = text.to_lowercase();
    let keyword_lower = keyword.to_lowercase();

    if text_lower.contains(&keyword_lower) {
        return true;
    }

    let words: Vec<&str> = keyword_lower.split_whitespace().collect();
    if words.len() > 1 {
        let matches = words
            .iter()
            .filter(|word| text_lower.contains(**word))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let (matched, required) = (
            matches as f64,
            words.len() as f64 * MULTI_WORD_MATCH_RATIO,
        );
        return matched >= required;
    }

    false
}

/// A thread is relevant when its title or the first 500 characters of its
/// body match.
#[must_use]
pub fn candidate_is_relevant(title: &str, body: &str, keyword: &str) -> bool {
    if is_relevant(title, keyword) {
        return true;
    }
    let snippet: String = body.chars().take(BODY_SNIPPET_CHARS).collect();
    is_relevant(&snippet, keyword)
}
