use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static INTEREST_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\n]+").expect("static regex"));

/// Lowercases text and collapses whitespace runs into single spaces.
///
/// Keyword heuristics match against folded text, so "Machine\n  Learning"
/// and "machine learning" are treated alike.
#[must_use]
pub fn fold(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    WHITESPACE.replace_all(&lowered, " ").into_owned()
}

/// Returns `true` when any of `keywords` occurs in already-folded `haystack`.
#[must_use]
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Splits a free-text interest list on commas, semicolons, and newlines.
///
/// Entries are trimmed, blanks dropped, and case-insensitive duplicates
/// removed while keeping the first spelling.
#[must_use]
pub fn parse_interests(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    INTEREST_SEPARATORS
        .split(text)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(fold(entry)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_reduces_whitespace_and_case() {
        assert_eq!(fold("  Machine\n   LEARNING "), "machine learning");
        assert_eq!(fold("Машинное Обучение"), "машинное обучение");
    }

    #[test]
    fn interests_split_and_dedupe() {
        let parsed = parse_interests("NLP, computer vision;\nnlp ,, MLOps");
        assert_eq!(parsed, vec!["NLP", "computer vision", "MLOps"]);
    }

    #[test]
    fn blank_interest_text_yields_nothing() {
        assert!(parse_interests("  ,\n ; ").is_empty());
    }
}
