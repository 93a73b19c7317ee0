//! LINE webhook endpoint
//!
//! Verifies the delivery, hands each text message to the orchestrator and
//! sends the reply back. One task per message; provider failures never reach
//! the platform, they end in the fallback reply.

use crate::core::orchestrator::Orchestrator;
use crate::messaging::{
    InboundText, LineClient, SIGNATURE_HEADER, WebhookPayload, verify_signature,
};
use crate::server::state::AppState;
use crate::utils::error::RelayError;
use actix_web::{HttpRequest, HttpResponse, web};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Configure webhook routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::post().to(webhook));
}

/// Receive one webhook delivery
pub async fn webhook(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    let (Some(secret), Some(line)) = (state.channel_secret(), state.line.clone()) else {
        warn!("Webhook delivery rejected: LINE credentials are not configured");
        return Err(RelayError::messaging_unavailable(
            "LINE channel credentials are not configured",
        ));
    };

    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| RelayError::signature("Missing X-Line-Signature header"))?;

    if let Err(e) = verify_signature(secret, &body, signature) {
        warn!(error = %e, "Webhook signature verification failed");
        return Err(e);
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| RelayError::bad_request(format!("Invalid webhook payload: {}", e)))?;

    let messages = payload.text_messages();
    debug!(
        events = payload.events.len(),
        text_messages = messages.len(),
        "Webhook delivery accepted"
    );

    let tasks = messages.into_iter().map(|message| {
        let orchestrator = Arc::clone(&state.orchestrator);
        let line = line.clone();
        tokio::spawn(handle_text_message(orchestrator, line, message))
    });

    for result in join_all(tasks).await {
        if let Err(e) = result {
            error!(error = %e, "Message task failed");
        }
    }

    Ok(HttpResponse::Ok().body("OK"))
}

async fn handle_text_message(orchestrator: Arc<Orchestrator>, line: LineClient, message: InboundText) {
    let reply = orchestrator.respond_detailed(&message.text).await;
    info!(
        user = message.user_id.as_deref().unwrap_or("unknown"),
        outcome = ?reply.outcome,
        provider = reply.provider.as_ref().map(|p| p.as_str()).unwrap_or("none"),
        attempts = reply.attempts.len(),
        "Replying to message"
    );

    if let Err(e) = line.reply_message(&message.reply_token, &reply.text).await {
        error!(error = %e, "Failed to send reply");
    }
}
