mod config;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod pipeline;
mod routes;
mod state;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::build_service;
use crate::pipeline::{CoverLetterPipeline, PdfTextExtractor, PipelineSettings};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Generation Service backend
    let service = build_service(&config.provider, &config.generation)?;
    info!(
        "Generation service initialized (provider: {}, model: {})",
        service.provider(),
        service.model_name()
    );
    if !service.check_availability().await {
        warn!(
            "Model {} is not available yet; requests will use fallback output until it is",
            service.model_name()
        );
    }

    // Build the cover letter pipeline
    let extractor = Arc::new(PdfTextExtractor::new(config.documents.clone()));
    let pipeline = CoverLetterPipeline::new(
        Arc::clone(&service),
        extractor,
        PipelineSettings {
            documents: config.documents.clone(),
            keywords: config.keywords.clone(),
            max_tokens: config.generation.max_tokens,
            temp_dir: None,
        },
    );

    // Build app state
    let state = AppState {
        service,
        pipeline,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
