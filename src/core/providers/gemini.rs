//! Google Gemini `generateContent` adapter

use super::error::ProviderFailure;
use super::shared::{bounded, non_empty, send_json};
use crate::config::{ProviderConfig, ProviderKind};
use crate::core::traits::error_mapper::preview;
use crate::core::traits::{DefaultErrorMapper, ErrorMapper, TextProvider};
use crate::core::types::{GenerationRequest, GenerationResult, ProviderId};
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Gemini error mapping
///
/// Gemini answers a bad key with 400 `INVALID_ARGUMENT` and quota
/// exhaustion with `RESOURCE_EXHAUSTED`, so the body is inspected before the
/// status.
pub struct GeminiErrorMapper;

impl ErrorMapper for GeminiErrorMapper {
    fn map_http_error(&self, status_code: u16, response_body: &str) -> ProviderFailure {
        if response_body.contains("API_KEY_INVALID") || response_body.contains("API key not valid") {
            return ProviderFailure::auth(format!("HTTP {}: API key rejected", status_code));
        }
        if response_body.contains("RESOURCE_EXHAUSTED") {
            return ProviderFailure::rate_limited(format!(
                "HTTP {}: {}",
                status_code,
                preview(response_body)
            ));
        }
        DefaultErrorMapper.map_http_error(status_code, response_body)
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini `models/{model}:generateContent` provider
pub struct GeminiProvider {
    id: ProviderId,
    api_key: String,
    base_url: String,
    model: String,
    system_prompt: String,
    timeout_override: Option<Duration>,
    client: Client,
}

impl GeminiProvider {
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
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn prompt(&self, text: &str) -> String {
        format!(
            "{}\n\n用戶問題：{}\n\n請用繁體中文回答：",
            self.system_prompt, text
        )
    }

    async fn complete(&self, request: &GenerationRequest) -> std::result::Result<String, ProviderFailure> {
        let prompt = self.prompt(&request.text);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!(provider = %self.id, request_id = %request.request_id, model = %self.model, "Calling Gemini");

        // Key travels in a header so it never appears in URLs or error text
        let response: GenerateContentResponse = send_json(
            self.client
                .post(self.endpoint())
                .header("x-goog-api-key", &self.api_key),
            &body,
            &GeminiErrorMapper,
        )
        .await?;

        extract_text(response)
    }
}

fn extract_text(response: GenerateContentResponse) -> std::result::Result<String, ProviderFailure> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ProviderFailure::invalid_response(format!(
            "Prompt blocked: {}",
            reason
        )));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ProviderFailure::invalid_response("No candidates returned"));
    };

    let text = candidate.content.map(|content| {
        content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>()
    });

    match (non_empty(text), candidate.finish_reason) {
        (Ok(text), _) => Ok(text),
        (Err(_), Some(reason)) if reason != "STOP" => Err(ProviderFailure::invalid_response(
            format!("Generation stopped: {}", reason),
        )),
        (Err(failure), _) => Err(failure),
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn timeout_override(&self) -> Option<Duration> {
        self.timeout_override
    }

    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> GenerationResult {
        bounded(timeout, self.complete(request)).await
    }
}
