use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}").unwrap(),
        Regex::new(r"\+?1?[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap(),
    ]
});

/// Returns the configured keywords that occur (case-insensitively) in `text`,
/// in table order and without duplicates.
pub fn extract_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    if text.is_empty() || keywords.is_empty() {
        return Vec::new();
    }
    let text_lower = text.to_lowercase();
    let found = keywords
        .iter()
        .filter(|k| !k.is_empty() && text_lower.contains(&k.to_lowercase()))
        .cloned()
        .collect::<Vec<_>>();
    dedup_preserving_order(found)
}

/// True when `haystack` (already lowercased) contains any of `needles`,
/// compared case-insensitively.
pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| {
        let needle = n.as_ref();
        !needle.is_empty() && haystack.contains(&needle.to_lowercase())
    })
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// Removes repeated entries (compared case-insensitively), keeping the first occurrence.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
