/// Leading markers of provider failure text. Model output starting with one of
/// these is treated as "no usable output".
pub const PROVIDER_ERROR_PREFIXES: &[&str] =
    &["Model", "API Error", "Request", "Cannot", "Connection"];

pub fn looks_like_provider_error(text: &str) -> bool {
    let trimmed = text.trim_start();
    PROVIDER_ERROR_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Quality gate for generated prose: long enough and not a provider failure message.
pub fn validate_response_quality(response: &str, min_length: usize) -> bool {
    let trimmed = response.trim();
    if trimmed.chars().count() < min_length {
        return false;
    }
    !looks_like_provider_error(trimmed)
}
