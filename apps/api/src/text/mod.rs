//! Text utilities shared by the extractors and the cover letter generator.
//!
//! Everything here is pure string/regex work over possibly-empty input and
//! never fails.

pub mod json;
pub mod markup;
pub mod patterns;
pub mod quality;

pub use json::parse_json_fragment;
pub use markup::{remove_thinking_tags, truncate_text};
pub use patterns::{
    contains_any, dedup_preserving_order, extract_email, extract_keywords, extract_phone,
};
pub use quality::{looks_like_provider_error, validate_response_quality};
