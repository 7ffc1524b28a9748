pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/provider", get(health::provider_handler))
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(generation_handlers::handle_generate_cover_letter),
        )
        // Extraction preview
        .route(
            "/api/v1/extract/job",
            post(extraction_handlers::handle_extract_job),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
