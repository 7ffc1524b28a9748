use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cover-letter-api"
    }))
}

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub provider: &'static str,
    pub model: String,
    pub available: bool,
}

/// GET /api/v1/provider
/// Reports the configured Generation Service and whether it can serve requests now.
pub async fn provider_handler(State(state): State<AppState>) -> Json<ProviderStatus> {
    let available = state.service.check_availability().await;
    Json(ProviderStatus {
        provider: state.service.provider(),
        model: state.service.model_name().to_string(),
        available,
    })
}
