//! Manual test endpoint
//!
//! Runs a message through the provider chain without the messaging
//! platform and returns the reply with its attempt history.

use crate::core::orchestrator::{Attempt, ReplyOutcome};
use crate::core::types::ProviderId;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::RelayError;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

/// Configure test routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/test-message")
            .app_data(json_config())
            .route(web::post().to(test_message)),
    );
}

/// Body extraction failures answer with the standard error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        RelayError::bad_request(format!("Invalid JSON body: {}", err)).into()
    })
}

#[derive(Debug, Deserialize)]
pub struct TestMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TestMessageResponse {
    pub response: String,
    pub provider: Option<ProviderId>,
    pub outcome: ReplyOutcome,
    pub attempts: Vec<Attempt>,
}

pub async fn test_message(
    state: web::Data<AppState>,
    body: web::Json<TestMessageRequest>,
) -> Result<HttpResponse, RelayError> {
    let message = body
        .into_inner()
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| RelayError::bad_request("Message is required"))?;

    let reply = state.orchestrator.respond_detailed(&message).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(TestMessageResponse {
        response: reply.text,
        provider: reply.provider,
        outcome: reply.outcome,
        attempts: reply.attempts,
    })))
}
