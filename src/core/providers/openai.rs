//! OpenAI chat completions adapter

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

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI `/v1/chat/completions` provider
pub struct OpenAiProvider {
    id: ProviderId,
    api_key: String,
    base_url: String,
    model: String,
    system_prompt: String,
    timeout_override: Option<Duration>,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig, client: Client, system_prompt: &str) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RelayError::config(format!("Provider {} has no API key", config.name)))?;

        Ok(Self {
            id: config.id(),
            api_key,
            base_url: config.resolved_base_url(),
            model: config.resolved_model(),
            system_prompt: system_prompt.to_string(),
            timeout_override: config.timeout(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    async fn complete(&self, request: &GenerationRequest) -> std::result::Result<String, ProviderFailure> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.text,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(provider = %self.id, request_id = %request.request_id, model = %self.model, "Calling OpenAI");

        let response: ChatCompletionResponse = send_json(
            self.client.post(self.endpoint()).bearer_auth(&self.api_key),
            &body,
            &DefaultErrorMapper,
        )
        .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        non_empty(content)
    }
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn timeout_override(&self) -> Option<Duration> {
        self.timeout_override
    }

    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> GenerationResult {
        bounded(timeout, self.complete(request)).await
    }
}
