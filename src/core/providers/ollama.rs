//! Ollama `/api/generate` adapter
//!
//! Ollama runs locally and needs no key; the provider is configured by its
//! URL alone.

use super::error::ProviderFailure;
use super::shared::{bounded, non_empty, send_json};
use crate::config::{ProviderConfig, ProviderKind};
use crate::core::traits::{DefaultErrorMapper, TextProvider};
use crate::core::types::{GenerationRequest, GenerationResult, ProviderId};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug)]
pub struct OllamaProvider {
    id: ProviderId,
    base_url: String,
    model: String,
    system_prompt: String,
    timeout_override: Option<Duration>,
    client: Client,
}

impl OllamaProvider {
    pub fn new(config: &ProviderConfig, client: Client, system_prompt: &str) -> Result<Self> {
        Ok(Self {
            id: config.id(),
            base_url: config.resolved_base_url(),
            model: config.resolved_model(),
            system_prompt: system_prompt.to_string(),
            timeout_override: config.timeout(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    async fn complete(&self, request: &GenerationRequest) -> std::result::Result<String, ProviderFailure> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: format!("{}\n\nUser: {}\nAssistant:", self.system_prompt, request.text),
            stream: false,
        };

        debug!(provider = %self.id, request_id = %request.request_id, model = %self.model, "Calling Ollama");

        let response: GenerateResponse =
            send_json(self.client.post(self.endpoint()), &body, &DefaultErrorMapper).await?;
        non_empty(response.response)
    }
}

#[async_trait]
impl TextProvider for OllamaProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn timeout_override(&self) -> Option<Duration> {
        self.timeout_override
    }

    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> GenerationResult {
        bounded(timeout, self.complete(request)).await
    }
}
