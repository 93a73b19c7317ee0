//! Multi-provider response orchestration
//!
//! Turns one inbound message into one reply: asks the health tracker for an
//! attempt order, calls providers one at a time until one succeeds, records
//! every outcome and falls back to a fixed message when the chain runs dry.
//!
//! # Module Structure
//!
//! - `types` - Reply and attempt metadata
//! - `tests` - Test suite for the failover loop

pub mod types;

pub use types::{Attempt, RelayReply, ReplyOutcome};

use crate::config::{Config, OrchestratorConfig};
use crate::core::health::HealthTracker;
use crate::core::providers::ProviderRegistry;
use crate::core::traits::TextProvider;
use crate::core::types::{FailureKind, GenerationRequest, GenerationResult};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Relays a message through the provider chain
#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: ProviderRegistry,
    tracker: Arc<HealthTracker>,
    default_timeout: Duration,
    fallback_message: String,
    apology_message: String,
}

impl Orchestrator {
    /// Create an orchestrator with a fresh tracker over the registry's providers
    pub fn new(registry: ProviderRegistry, config: &OrchestratorConfig) -> Self {
        let tracker = Arc::new(HealthTracker::new(registry.ids(), config.health_policy()));
        Self::with_tracker(registry, tracker, config)
    }

    /// Create an orchestrator that shares an existing tracker
    pub fn with_tracker(
        registry: ProviderRegistry,
        tracker: Arc<HealthTracker>,
        config: &OrchestratorConfig,
    ) -> Self {
        Self {
            registry,
            tracker,
            default_timeout: config.provider_timeout(),
            fallback_message: config.fallback_message.clone(),
            apology_message: config.apology_message.clone(),
        }
    }

    /// Build adapters for every configured provider and wire them up
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = ProviderRegistry::from_config(config)?;
        Ok(Self::new(registry, &config.orchestrator))
    }

    /// Shared health state, for read-only status views
    pub fn health(&self) -> &Arc<HealthTracker> {
        &self.tracker
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Reply text for one message
    ///
    /// Never fails: the result is a provider's completion, the apology for
    /// empty input, or the fallback message.
    pub async fn respond(&self, text: &str) -> String {
        self.respond_detailed(text).await.text
    }

    /// Reply for one message together with its attempt history
    pub async fn respond_detailed(&self, text: &str) -> RelayReply {
        let text = text.trim();
        if text.is_empty() {
            debug!("Empty message, replying with apology");
            return RelayReply::apology(self.apology_message.clone());
        }

        let request = GenerationRequest::new(text);
        let order = self.tracker.ordered_providers();
        debug!(
            request_id = %request.request_id,
            chars = text.chars().count(),
            providers = order.len(),
            "Relaying message"
        );

        let mut attempts = Vec::with_capacity(order.len());
        for provider_id in order {
            let Some(provider) = self.registry.get(&provider_id) else {
                warn!(provider = %provider_id, "Tracked provider missing from registry");
                continue;
            };

            let timeout = provider.timeout_override().unwrap_or(self.default_timeout);
            let started = Instant::now();
            let outcome = self.attempt(provider, &request, timeout).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            attempts.push(Attempt::new(provider_id.clone(), &outcome, elapsed_ms));

            match outcome {
                GenerationResult::Success { text } => {
                    info!(
                        request_id = %request.request_id,
                        provider = %provider_id,
                        attempt = attempts.len(),
                        elapsed_ms,
                        "Provider answered"
                    );
                    return RelayReply::answered(text, provider_id, attempts);
                }
                GenerationResult::Failure { kind, detail } => {
                    warn!(
                        request_id = %request.request_id,
                        provider = %provider_id,
                        attempt = attempts.len(),
                        kind = %kind,
                        detail = %detail,
                        elapsed_ms,
                        "Provider failed, trying next"
                    );
                }
            }
        }

        warn!(
            request_id = %request.request_id,
            attempts = attempts.len(),
            "No provider produced a reply, sending fallback"
        );
        RelayReply::fallback(self.fallback_message.clone(), attempts)
    }

    /// Run one provider call and record its outcome
    ///
    /// The call and its `record()` run in their own task, so the health
    /// signal survives even if the caller stops waiting.
    async fn attempt(
        &self,
        provider: Arc<dyn TextProvider>,
        request: &GenerationRequest,
        timeout: Duration,
    ) -> GenerationResult {
        let provider_id = provider.id().clone();
        let tracker = Arc::clone(&self.tracker);
        let request = request.clone();

        let handle = tokio::spawn(async move {
            // Adapters get the budget too, but it is enforced here
            let call = provider.generate(&request, timeout);
            let outcome = match tokio::time::timeout(timeout, call).await {
                Ok(outcome) => outcome,
                Err(_) => GenerationResult::failure(
                    FailureKind::Timeout,
                    format!("No response within {}ms", timeout.as_millis()),
                ),
            };
            tracker.record(provider.id(), &outcome);
            outcome
        });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                // The task never reached record()
                let outcome = GenerationResult::failure(
                    FailureKind::NetworkError,
                    format!("Provider task aborted: {}", e),
                );
                self.tracker.record(&provider_id, &outcome);
                outcome
            }
        }
    }
}
