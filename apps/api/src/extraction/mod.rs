// Extraction: résumé text and job postings → fixed-shape records.
// Each extractor tries the Generation Service first and falls back to a
// keyword heuristic; neither ever returns an error to its caller.

pub mod handlers;
pub mod job;
pub mod models;
pub mod prompts;
pub mod resume;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::llm_client::{GenerationError, GenerationService};
use crate::text::{looks_like_provider_error, parse_json_fragment, remove_thinking_tags};

pub use job::{extract_job_description, validate_job_extraction};
pub use models::{ExtractionResult, JobDescriptionExtraction, ResumeExtraction};
pub use resume::{extract_resume, validate_resume_extraction};

/// Inputs shorter than this skip the model call and go straight to the heuristic.
pub const MIN_EXTRACTION_CHARS: usize = 50;

/// Response-length cap for extraction calls; the JSON answers are short.
const EXTRACTION_MAX_LENGTH: u32 = 1000;

/// Why the model path was abandoned. Logged, then absorbed by the fallback.
#[derive(Debug, Error)]
enum ExtractionFailure {
    #[error("generation service failed: {0}")]
    Service(#[from] GenerationError),

    #[error("model output looks like a provider error message")]
    ProviderErrorText,

    #[error("model output held no JSON object with the required fields")]
    Unparsable,
}

/// Calls the model and parses its answer as `T`.
///
/// Reasoning markup is stripped before the JSON object is isolated, since a
/// `<think>` block may itself contain braces.
async fn request_json<T: DeserializeOwned>(
    service: &dyn GenerationService,
    prompt: &str,
) -> Result<T, ExtractionFailure> {
    let response = service.generate(prompt, EXTRACTION_MAX_LENGTH).await?;
    info!("Extraction response length: {}", response.len());

    if looks_like_provider_error(&response) {
        return Err(ExtractionFailure::ProviderErrorText);
    }

    let cleaned = remove_thinking_tags(&response);
    parse_json_fragment(&cleaned).ok_or(ExtractionFailure::Unparsable)
}
