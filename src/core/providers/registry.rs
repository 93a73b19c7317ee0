//! Provider Registry
//!
//! Ordered registry of the providers that take part in the rotation.
//! Registration order is the configuration order and the health tracker's
//! final tie-break.

use super::{GeminiProvider, HuggingFaceProvider, OllamaProvider, OpenAiProvider};
use crate::config::{Config, ProviderConfig, ProviderKind};
use crate::core::traits::TextProvider;
use crate::core::types::ProviderId;
use crate::utils::error::{RelayError, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Provider registry holding trait objects in attempt order
#[derive(Debug, Default, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build adapters for every configured provider
    ///
    /// Unconfigured providers are skipped here and never reach the health
    /// tracker. All adapters share one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client()?;
        let mut registry = Self::new();

        for provider in &config.providers {
            if !provider.is_configured() {
                info!(provider = %provider.name, kind = %provider.kind, "Provider not configured, skipping");
                continue;
            }
            let adapter = build_provider(provider, client.clone(), &config.orchestrator.system_prompt)?;
            info!(
                provider = %provider.name,
                kind = %provider.kind,
                model = %provider.resolved_model(),
                "Provider registered"
            );
            registry.register(adapter);
        }

        if registry.is_empty() {
            warn!("No AI provider is configured; every message will get the fallback reply");
        }
        Ok(registry)
    }

    /// Register a provider at the end of the order
    ///
    /// A provider whose id is already registered is ignored.
    pub fn register(&mut self, provider: Arc<dyn TextProvider>) {
        if self.contains(provider.id()) {
            warn!(provider = %provider.id(), "Provider already registered");
            return;
        }
        self.providers.push(provider);
    }

    /// Get provider by id
    pub fn get(&self, id: &ProviderId) -> Option<Arc<dyn TextProvider>> {
        self.providers.iter().find(|p| p.id() == id).cloned()
    }

    pub fn contains(&self, id: &ProviderId) -> bool {
        self.providers.iter().any(|p| p.id() == id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|p| p.id().clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TextProvider>> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

fn build_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("line-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(RelayError::from)
}

/// Build the adapter matching a provider's kind
pub fn build_provider(
    config: &ProviderConfig,
    client: Client,
    system_prompt: &str,
) -> Result<Arc<dyn TextProvider>> {
    let provider: Arc<dyn TextProvider> = match config.kind {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config, client, system_prompt)?),
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config, client, system_prompt)?),
        ProviderKind::HuggingFace => {
            Arc::new(HuggingFaceProvider::new(config, client, system_prompt)?)
        }
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(config, client, system_prompt)?),
    };
    Ok(provider)
}
