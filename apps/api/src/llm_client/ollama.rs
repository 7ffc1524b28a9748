//! Local model server backend (Ollama HTTP API).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{classify_transport_error, GenerationError, GenerationService, AVAILABILITY_TIMEOUT};
use crate::config::GenerationParams;

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
    params: GenerationParams,
}

impl OllamaClient {
    pub fn new(
        base_url: &str,
        model: &str,
        timeout_secs: u64,
        params: GenerationParams,
    ) -> Result<Self, reqwest::Error> {
        info!("Initializing Ollama client with model: {model}");
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
            params,
        })
    }

    /// Lists the model names installed on the server.
    pub async fn available_models(&self) -> Result<Vec<String>, GenerationError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(AVAILABILITY_TIMEOUT)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, AVAILABILITY_TIMEOUT.as_secs()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl GenerationService for OllamaClient {
    async fn check_availability(&self) -> bool {
        match self.available_models().await {
            Ok(models) => {
                debug!("Available Ollama models: {models:?}");
                let found = models.iter().any(|m| model_matches(&self.model, m));
                if !found {
                    warn!("Model '{}' not found in available models", self.model);
                }
                found
            }
            Err(e) => {
                error!("Error checking Ollama model availability: {e}");
                false
            }
        }
    }

    async fn generate(&self, prompt: &str, max_length: u32) -> Result<String, GenerationError> {
        if !self.check_availability().await {
            return Err(GenerationError::Unavailable(format!(
                "Model '{}' not available. Please pull the model first with: ollama pull {}",
                self.model, self.model
            )));
        }

        let request_body = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.params.temperature,
                num_predict: max_length,
                top_p: self.params.top_p,
                top_k: self.params.top_k,
            },
        };

        info!("Sending request to Ollama with model: {}", self.model);
        debug!("Prompt length: {} characters", prompt.len());

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Ollama API error: {} - {}", status, body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| classify_transport_error(e, self.timeout_secs))?;

        let generated = result.response.trim().to_string();
        if generated.is_empty() {
            return Err(GenerationError::EmptyContent);
        }

        info!("Generated response length: {} characters", generated.len());
        Ok(generated)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &'static str {
        "ollama"
    }
}

/// An installed model satisfies the request when its name contains the
/// requested name, or shares the family name before the `:` tag.
fn model_matches(requested: &str, installed: &str) -> bool {
    let family = requested.split(':').next().unwrap_or(requested);
    installed.contains(requested) || installed.starts_with(family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_matches_exact() {
        assert!(model_matches("deepseek-r1:latest", "deepseek-r1:latest"));
    }

    #[test]
    fn test_model_matches_family_with_other_tag() {
        assert!(model_matches("llama3.2", "llama3.2:latest"));
        assert!(model_matches("deepseek-r1:latest", "deepseek-r1:7b"));
    }

    #[test]
    fn test_model_matches_rejects_other_family() {
        assert!(!model_matches("mistral", "llama3.1:latest"));
    }

    #[test]
    fn test_request_serializes_options() {
        let body = OllamaRequest {
            model: "llama3.2",
            prompt: "hi",
            stream: false,
            options: OllamaOptions {
                temperature: 0.5,
                num_predict: 1000,
                top_p: 0.9,
                top_k: 40,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 1000);
        assert_eq!(json["options"]["top_k"], 40);
    }

    #[test]
    fn test_tags_response_tolerates_missing_models() {
        let tags: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(tags.models.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OllamaClient::new(
            "http://localhost:11434/",
            "llama3.2",
            180,
            GenerationParams::default(),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
    }
}
