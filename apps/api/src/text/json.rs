use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::markup::collapse_whitespace;

/// Returns the substring from the first `{` to the last `}`, or `None` when
/// the text holds no such pair.
pub fn isolate_json_fragment(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Isolates the JSON object inside free-form model output, normalizes its
/// whitespace and deserializes it. Any failure is logged and yields `None`.
pub fn parse_json_fragment<T: DeserializeOwned>(text: &str) -> Option<T> {
    let fragment = isolate_json_fragment(text.trim())?;
    let normalized = collapse_whitespace(fragment);
    debug!(
        "Isolated JSON fragment: {}",
        normalized.chars().take(300).collect::<String>()
    );

    match serde_json::from_str(&normalized) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("JSON parsing failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        a: i32,
    }

    #[test]
    fn test_isolate_json_fragment_with_surrounding_chatter() {
        assert_eq!(
            isolate_json_fragment("Here is the result: {\"a\":1} Thanks!"),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_isolate_json_fragment_spans_first_to_last_brace() {
        assert_eq!(
            isolate_json_fragment("x {\"a\":{\"b\":2}} y } z"),
            Some("{\"a\":{\"b\":2}} y }")
        );
    }

    #[test]
    fn test_isolate_json_fragment_without_braces() {
        assert_eq!(isolate_json_fragment("no json here"), None);
        assert_eq!(isolate_json_fragment("} backwards {"), None);
    }

    #[test]
    fn test_parse_json_fragment_handles_code_fences_and_newlines() {
        let text = "```json\n{\n  \"a\": 7\n}\n```";
        assert_eq!(parse_json_fragment::<Sample>(text), Some(Sample { a: 7 }));
    }

    #[test]
    fn test_parse_json_fragment_malformed_is_none() {
        assert_eq!(parse_json_fragment::<Sample>("{\"a\": }"), None);
    }

    #[test]
    fn test_parse_json_fragment_missing_field_is_none() {
        assert_eq!(parse_json_fragment::<Sample>("{\"b\": 1}"), None);
    }
}
