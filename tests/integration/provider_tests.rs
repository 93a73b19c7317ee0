//! Provider adapter integration tests
//!
//! Each adapter runs against a wiremock server standing in for its vendor,
//! checking the request shape and the failure normalization.

use line_relay::config::{ProviderConfig, ProviderKind};
use line_relay::core::providers::{
    GeminiProvider, HuggingFaceProvider, OllamaProvider, OpenAiProvider,
};
use line_relay::{FailureKind, GenerationRequest, GenerationResult, TextProvider};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUDGET: Duration = Duration::from_secs(5);
const PERSONA: &str = "You are a helpful assistant.";

fn provider_config(kind: ProviderKind, server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(kind)
        .with_api_key("test-key")
        .with_base_url(server.uri())
}

fn openai(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new(&provider_config(ProviderKind::OpenAi, server), Client::new(), PERSONA).unwrap()
}

fn gemini(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(&provider_config(ProviderKind::Gemini, server), Client::new(), PERSONA).unwrap()
}

fn huggingface(server: &MockServer) -> HuggingFaceProvider {
    HuggingFaceProvider::new(
        &provider_config(ProviderKind::HuggingFace, server),
        Client::new(),
        PERSONA,
    )
    .unwrap()
}

fn ollama(server: &MockServer) -> OllamaProvider {
    OllamaProvider::new(&provider_config(ProviderKind::Ollama, server), Client::new(), PERSONA).unwrap()
}

async fn ask(provider: &dyn TextProvider, text: &str) -> GenerationResult {
    provider.generate(&GenerationRequest::new(text), BUDGET).await
}

async fn openai_answering(template: ResponseTemplate) -> (MockServer, OpenAiProvider) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(template)
        .mount(&server)
        .await;
    let provider = openai(&server);
    (server, provider)
}

#[tokio::test]
async fn test_openai_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "max_tokens": 500,
            "messages": [
                {"role": "system", "content": PERSONA},
                {"role": "user", "content": "你好"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "  哈囉！ "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = ask(&openai(&server), "你好").await;
    assert_eq!(result, GenerationResult::success("哈囉！"));
}

#[tokio::test]
async fn test_openai_status_normalization() {
    let cases = [
        (401, FailureKind::AuthError),
        (403, FailureKind::AuthError),
        (429, FailureKind::RateLimited),
        (504, FailureKind::Timeout),
        (500, FailureKind::NetworkError),
        (503, FailureKind::NetworkError),
        (400, FailureKind::InvalidResponse),
    ];

    for (status, expected) in cases {
        let (_server, provider) = openai_answering(
            ResponseTemplate::new(status).set_body_json(json!({"error": {"message": "nope"}})),
        )
        .await;
        let result = ask(&provider, "hi").await;
        assert_eq!(result.failure_kind(), Some(expected), "status {}", status);
    }
}

#[tokio::test]
async fn test_openai_empty_completion_is_invalid() {
    for body in [
        json!({"choices": []}),
        json!({"choices": [{"message": {"content": "   "}}]}),
        json!({"choices": [{"message": {"content": null}}]}),
    ] {
        let (_server, provider) = openai_answering(ResponseTemplate::new(200).set_body_json(body)).await;
        let result = ask(&provider, "hi").await;
        assert_eq!(result.failure_kind(), Some(FailureKind::InvalidResponse));
    }
}

#[tokio::test]
async fn test_openai_malformed_body_is_invalid() {
    let (_server, provider) =
        openai_answering(ResponseTemplate::new(200).set_body_string("<html>gateway</html>")).await;
    let result = ask(&provider, "hi").await;
    assert_eq!(result.failure_kind(), Some(FailureKind::InvalidResponse));
}

#[tokio::test]
async fn test_slow_vendor_times_out() {
    let (_server, provider) = openai_answering(
        ResponseTemplate::new(200)
            .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let result = provider
        .generate(&GenerationRequest::new("hi"), Duration::from_millis(100))
        .await;
    assert_eq!(result.failure_kind(), Some(FailureKind::Timeout));
}

#[tokio::test]
async fn test_unreachable_vendor_is_network_error() {
    let config = ProviderConfig::new(ProviderKind::Ollama).with_base_url("http://127.0.0.1:1");
    let provider = OllamaProvider::new(&config, Client::new(), PERSONA).unwrap();

    let result = ask(&provider, "hi").await;
    assert_eq!(result.failure_kind(), Some(FailureKind::NetworkError));
}

#[tokio::test]
async fn test_gemini_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "晴天"}, {"text": "，適合出門"}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = ask(&gemini(&server), "今天天氣如何？").await;
    assert_eq!(result, GenerationResult::success("晴天，適合出門"));
}

#[tokio::test]
async fn test_gemini_key_never_leaks_into_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"reason": "API_KEY_INVALID"}]
            }
        })))
        .mount(&server)
        .await;

    let result = ask(&gemini(&server), "hi").await;
    let GenerationResult::Failure { kind, detail } = result else {
        panic!("expected failure");
    };
    assert_eq!(kind, FailureKind::AuthError);
    assert!(!detail.contains("test-key"));
}

#[tokio::test]
async fn test_gemini_quota_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "Quota exceeded"}
        })))
        .mount(&server)
        .await;

    let result = ask(&gemini(&server), "hi").await;
    assert_eq!(result.failure_kind(), Some(FailureKind::RateLimited));
}

#[tokio::test]
async fn test_gemini_blocked_prompt_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let result = ask(&gemini(&server), "hi").await;
    assert_eq!(result.failure_kind(), Some(FailureKind::InvalidResponse));
}

#[tokio::test]
async fn test_huggingface_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/bigscience/bloom-560m"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "parameters": {"return_full_text": false}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"generated_text": "可以試試看。<|endoftext|>"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let result = ask(&huggingface(&server), "怎麼辦？").await;
    assert_eq!(result, GenerationResult::success("可以試試看。"));
}

#[tokio::test]
async fn test_huggingface_model_loading_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Model bigscience/bloom-560m is currently loading"
        })))
        .mount(&server)
        .await;

    let result = ask(&huggingface(&server), "hi").await;
    assert_eq!(result.failure_kind(), Some(FailureKind::InvalidResponse));
}

#[tokio::test]
async fn test_ollama_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "llama2", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama2",
            "response": "Sure thing.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = ask(&ollama(&server), "help").await;
    assert_eq!(result, GenerationResult::success("Sure thing."));
}
