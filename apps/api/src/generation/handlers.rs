//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::generation::{validate_cover_letter, CoverLetter, CoverLetterStats};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: CoverLetter,
    pub stats: CoverLetterStats,
    /// Structural check result; informational only.
    pub quality_passed: bool,
}

/// POST /api/v1/cover-letters
///
/// Multipart form with a `resume` PDF file and a `job_description` text field.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?);
            }
            "job_description" => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    let cover_letter = state
        .pipeline
        .process(resume.as_deref(), &job_description)
        .await?;

    let stats = CoverLetterStats::from_content(&cover_letter.content);
    let quality_passed = validate_cover_letter(&cover_letter.content);

    Ok(Json(CoverLetterResponse {
        cover_letter,
        stats,
        quality_passed,
    }))
}
