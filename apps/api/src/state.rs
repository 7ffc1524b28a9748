use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerationService;
use crate::pipeline::CoverLetterPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The configured Generation Service backend, shared with the pipeline.
    pub service: Arc<dyn GenerationService>,
    pub pipeline: CoverLetterPipeline,
    pub config: Arc<Config>,
}
