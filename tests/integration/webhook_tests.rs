//! Webhook integration tests
//!
//! A signed delivery goes in through the HTTP app and the reply comes out at
//! a wiremock server standing in for the LINE reply API.

use crate::common::providers::ScriptedProvider;
use crate::common::{messaging_config, text_delivery};
use actix_web::{test, web};
use line_relay::config::Config;
use line_relay::messaging::{LineClient, SIGNATURE_HEADER, create_signature};
use line_relay::server::{AppState, HttpServer};
use line_relay::{FailureKind, Orchestrator, ProviderId, ProviderRegistry, TextProvider};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn relay_state(config: Config, providers: &[Arc<ScriptedProvider>]) -> AppState {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        registry.register(Arc::clone(provider) as Arc<dyn TextProvider>);
    }
    let orchestrator = Orchestrator::new(registry, &config.orchestrator);
    let line = LineClient::from_config(&config.messaging).unwrap();
    AppState::new(config, orchestrator, line)
}

fn signed_post(body: &str) -> test::TestRequest {
    let signature = create_signature("channel-secret", body.as_bytes()).unwrap();
    test::TestRequest::post()
        .uri("/webhook")
        .insert_header((SIGNATURE_HEADER, signature))
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn test_text_message_is_answered_through_reply_api() {
    let line = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(header("authorization", "Bearer channel-token"))
        .and(body_partial_json(json!({
            "replyToken": "reply-1",
            "messages": [{"type": "text", "text": "您好 (早安)"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&line)
        .await;

    let openai = ScriptedProvider::answering("openai", "您好");
    let state = relay_state(messaging_config(&line.uri()), &[openai.clone()]);
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let body = text_delivery(&[("reply-1", "早安")]);
    let resp = test::call_service(&app, signed_post(&body).to_request()).await;

    assert!(resp.status().is_success());
    assert_eq!(openai.calls(), 1);
}

#[actix_web::test]
async fn test_each_message_in_a_delivery_gets_its_own_reply() {
    let line = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&line)
        .await;

    let openai = ScriptedProvider::answering("openai", "ok");
    let state = relay_state(messaging_config(&line.uri()), &[openai.clone()]);
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let body = text_delivery(&[("r1", "one"), ("r2", "two"), ("r3", "three")]);
    let resp = test::call_service(&app, signed_post(&body).to_request()).await;

    assert!(resp.status().is_success());
    assert_eq!(openai.calls(), 3);
}

#[actix_web::test]
async fn test_provider_outage_still_replies_with_fallback() {
    let config = messaging_config("http://placeholder");
    let fallback = config.orchestrator.fallback_message.clone();

    let line = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(body_partial_json(json!({
            "replyToken": "reply-1",
            "messages": [{"type": "text", "text": fallback}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&line)
        .await;

    let mut config = config;
    config.messaging.api_base = line.uri();
    let state = relay_state(
        config,
        &[
            ScriptedProvider::failing("openai", FailureKind::RateLimited),
            ScriptedProvider::failing("gemini", FailureKind::NetworkError),
        ],
    );
    let health = Arc::clone(state.orchestrator.health());
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let resp = test::call_service(&app, signed_post(&text_delivery(&[("reply-1", "hi")])).to_request()).await;
    assert!(resp.status().is_success());

    for id in ["openai", "gemini"] {
        let record = health.get(&ProviderId::from(id)).unwrap();
        assert_eq!(record.consecutive_failures, 1);
    }
}

#[actix_web::test]
async fn test_reply_api_failure_does_not_fail_the_delivery() {
    let line = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid reply token"})))
        .expect(1)
        .mount(&line)
        .await;

    let state = relay_state(
        messaging_config(&line.uri()),
        &[ScriptedProvider::answering("openai", "ok")],
    );
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let resp = test::call_service(&app, signed_post(&text_delivery(&[("expired", "hi")])).to_request()).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_non_text_events_are_acknowledged_without_reply() {
    let line = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&line)
        .await;

    let openai = ScriptedProvider::answering("openai", "ok");
    let state = relay_state(messaging_config(&line.uri()), &[openai.clone()]);
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let body = json!({
        "destination": "Udeadbeef",
        "events": [
            {"type": "follow", "replyToken": "r1", "source": {"type": "user", "userId": "U1"}},
            {
                "type": "message",
                "replyToken": "r2",
                "source": {"type": "user", "userId": "U1"},
                "message": {"type": "sticker", "id": "2", "packageId": "1", "stickerId": "1"}
            }
        ]
    })
    .to_string();
    let resp = test::call_service(&app, signed_post(&body).to_request()).await;

    assert!(resp.status().is_success());
    assert_eq!(openai.calls(), 0);
}

#[actix_web::test]
async fn test_tampered_delivery_is_rejected_before_any_provider_call() {
    let openai = ScriptedProvider::answering("openai", "ok");
    let state = relay_state(messaging_config("http://127.0.0.1:1"), &[openai.clone()]);
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let body = text_delivery(&[("r1", "hi")]);
    let signature = create_signature("channel-secret", body.as_bytes()).unwrap();
    let tampered = body.replace("hi", "ho");

    let req = test::TestRequest::post()
        .uri("/webhook")
        .insert_header((SIGNATURE_HEADER, signature))
        .set_payload(tampered)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    assert_eq!(openai.calls(), 0);
}
