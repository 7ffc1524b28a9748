/// LLM Client: the Generation Service capability and its provider backends.
///
/// ARCHITECTURAL RULE: extractors and the generator only ever see
/// `dyn GenerationService`. No other module talks to a provider directly.
///
/// Failures cross this boundary as a typed `GenerationError`, never as text.
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;

use crate::config::{GenerationParams, ProviderSettings};

pub mod gemini;
pub mod ollama;
pub mod prompts;
#[cfg(test)]
pub mod testing;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

/// Timeout for availability probes, independent of the generation timeout.
const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Cannot connect to provider: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Provider returned empty content")]
    EmptyContent,
}

/// A text generation backend. Implementations are stateless beyond their
/// connection settings and safe to share across concurrent requests.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Reports whether the configured model can currently serve requests.
    async fn check_availability(&self) -> bool;

    /// Generates text for `prompt`, capping the response at `max_length` tokens.
    async fn generate(&self, prompt: &str, max_length: u32) -> Result<String, GenerationError>;

    fn model_name(&self) -> &str;

    fn provider(&self) -> &'static str;
}

/// Builds the configured backend.
pub fn build_service(
    settings: &ProviderSettings,
    params: &GenerationParams,
) -> Result<Arc<dyn GenerationService>> {
    match settings {
        ProviderSettings::Ollama {
            base_url,
            model,
            timeout_secs,
        } => {
            let client = OllamaClient::new(base_url, model, *timeout_secs, params.clone())
                .context("Failed to build Ollama HTTP client")?;
            Ok(Arc::new(client))
        }
        ProviderSettings::Gemini {
            api_key,
            model,
            timeout_secs,
        } => {
            let client = GeminiClient::new(api_key, model, *timeout_secs, params.clone())
                .context("Failed to build Gemini HTTP client")?;
            Ok(Arc::new(client))
        }
    }
}

/// Maps a transport-level reqwest failure onto the typed taxonomy.
fn classify_transport_error(err: reqwest::Error, timeout_secs: u64) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout {
            seconds: timeout_secs,
        }
    } else if err.is_decode() {
        GenerationError::Malformed(err.to_string())
    } else {
        GenerationError::Connection(err.to_string())
    }
}
