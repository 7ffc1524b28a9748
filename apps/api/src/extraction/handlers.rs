//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::{
    extract_job_description, validate_job_extraction, ExtractionResult, JobDescriptionExtraction,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractJobRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractJobResponse {
    pub extraction: JobDescriptionExtraction,
    pub audit: ExtractionResult,
}

/// POST /api/v1/extract/job
///
/// Runs the job extractor alone so callers can preview what the letter will target.
pub async fn handle_extract_job(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobRequest>,
) -> Result<Json<ExtractJobResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let extraction = extract_job_description(
        &*state.service,
        &request.job_description,
        &state.config.keywords,
    )
    .await;
    let audit = validate_job_extraction(&extraction);

    Ok(Json(ExtractJobResponse { extraction, audit }))
}
