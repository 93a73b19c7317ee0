//! Hugging Face Inference API adapter

use super::error::ProviderFailure;
use super::shared::{bounded, non_empty, send_json};
use crate::config::{ProviderConfig, ProviderKind};
use crate::core::traits::{DefaultErrorMapper, TextProvider};
use crate::core::types::{GenerationRequest, GenerationResult, ProviderId};
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

const MAX_NEW_TOKENS: u32 = 80;
const TEMPERATURE: f32 = 0.8;
const END_OF_TEXT: &str = "<|endoftext|>";

#[derive(Debug, Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

/// The API answers with a list of generations, or an object with an error
/// even on some 200 responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Generations(Vec<Generation>),
    Error { error: String },
}

/// Hugging Face `models/{model}` text-generation provider
pub struct HuggingFaceProvider {
    id: ProviderId,
    token: String,
    base_url: String,
    model: String,
    system_prompt: String,
    timeout_override: Option<Duration>,
    client: Client,
}

impl HuggingFaceProvider {
    pub fn new(config: &ProviderConfig, client: Client, system_prompt: &str) -> Result<Self> {
        let token = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RelayError::config(format!("Provider {} has no token", config.name)))?;

        Ok(Self {
            id: config.id(),
            token,
            base_url: config.resolved_base_url(),
            model: config.resolved_model(),
            system_prompt: system_prompt.to_string(),
            timeout_override: config.timeout(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    fn prompt(&self, text: &str) -> String {
        format!("{}\n\n問題：{}\n回答：", self.system_prompt, text)
    }

    async fn complete(&self, request: &GenerationRequest) -> std::result::Result<String, ProviderFailure> {
        let prompt = self.prompt(&request.text);
        let body = InferenceRequest {
            inputs: &prompt,
            parameters: Parameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
        };

        debug!(provider = %self.id, request_id = %request.request_id, model = %self.model, "Calling Hugging Face");

        let response: InferenceResponse = send_json(
            self.client.post(self.endpoint()).bearer_auth(&self.token),
            &body,
            &DefaultErrorMapper,
        )
        .await?;

        extract_text(response, &prompt)
    }
}

fn extract_text(response: InferenceResponse, prompt: &str) -> std::result::Result<String, ProviderFailure> {
    match response {
        InferenceResponse::Error { error } => Err(ProviderFailure::invalid_response(error)),
        InferenceResponse::Generations(generations) => {
            let text = generations
                .into_iter()
                .next()
                .and_then(|g| g.generated_text)
                .map(|text| {
                    // Some models echo the prompt despite return_full_text=false
                    let text = text.strip_prefix(prompt).unwrap_or(&text);
                    text.replace(END_OF_TEXT, "")
                });
            non_empty(text)
        }
    }
}

impl fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextProvider for HuggingFaceProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    fn timeout_override(&self) -> Option<Duration> {
        self.timeout_override
    }

    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> GenerationResult {
        bounded(timeout, self.complete(request)).await
    }
}
