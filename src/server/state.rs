//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::health::HealthTracker;
use crate::core::orchestrator::Orchestrator;
use crate::messaging::LineClient;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cheap to clone; every field is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay configuration (shared read-only)
    pub config: Arc<Config>,
    /// Provider chain
    pub orchestrator: Arc<Orchestrator>,
    /// Reply client, present when the channel token is configured
    pub line: Option<LineClient>,
    /// Process start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, orchestrator: Orchestrator, line: Option<LineClient>) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            line,
            started_at: Utc::now(),
        }
    }

    /// Get relay configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of provider health
    pub fn health(&self) -> &HealthTracker {
        self.orchestrator.health()
    }

    /// Channel secret, when webhook deliveries can be verified
    pub fn channel_secret(&self) -> Option<&str> {
        self.config
            .messaging
            .channel_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
    }
}
