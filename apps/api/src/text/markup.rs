use once_cell::sync::Lazy;
use regex::Regex;

static THINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Removes every `<think>...</think>` span (multi-line included) and trims the result.
///
/// Some local reasoning models emit their chain-of-thought inline; it must never
/// reach the user. Unpaired tags are handled too: text before a stray `</think>`
/// is reasoning whose opener was dropped, and text after an unclosed `<think>`
/// is reasoning cut off by the token cap.
pub fn remove_thinking_tags(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let paired = THINK_RE.replace_all(text, "");

    let mut answer: &str = &paired;
    if let Some(idx) = answer.rfind(THINK_CLOSE) {
        answer = &answer[idx + THINK_CLOSE.len()..];
    }
    if let Some(idx) = answer.find(THINK_OPEN) {
        answer = &answer[..idx];
    }
    answer.trim().to_string()
}

/// Collapses every whitespace run (newlines included) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Keeps the first `max_chars` characters and appends `suffix` when anything was cut.
pub fn truncate_text(text: &str, max_chars: usize, suffix: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], suffix),
        None => text.to_string(),
    }
}
