//! Health check and provider status endpoints
//!
//! Both endpoints only read state; nothing here touches the health tracker's
//! write path.

use crate::core::health::ProviderStatus;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/providers", web::get().to(provider_status));
}

/// Service health payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    pub version: Cow<'static, str>,
    pub uptime_secs: i64,
    /// Whether webhook deliveries can be verified and answered
    pub messaging_configured: bool,
    pub providers: ProviderSummary,
}

/// Which providers are in the rotation
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSummary {
    pub configured: Vec<String>,
    pub unconfigured: Vec<String>,
}

/// Provider health payload for dashboards
#[derive(Debug, Clone, Serialize)]
pub struct ProvidersStatus {
    pub disable_threshold: u32,
    pub cooldown_secs: u64,
    /// Current attempt order
    pub order: Vec<String>,
    pub providers: Vec<ProviderStatus>,
}

/// Basic health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let config = state.config();
    let now = Utc::now();
    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: now,
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_secs: (now - state.started_at).num_seconds(),
        messaging_configured: config.messaging.is_configured(),
        providers: ProviderSummary {
            configured: config
                .configured_providers()
                .map(|p| p.name.clone())
                .collect(),
            unconfigured: config
                .unconfigured_providers()
                .map(|p| p.name.clone())
                .collect(),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Read-only snapshot of every tracked provider
pub async fn provider_status(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let health = state.health();
    let policy = health.policy();
    let status = ProvidersStatus {
        disable_threshold: policy.disable_threshold,
        cooldown_secs: policy.cooldown.as_secs(),
        order: health
            .ordered_providers()
            .into_iter()
            .map(|id| id.to_string())
            .collect(),
        providers: health.snapshot(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}
