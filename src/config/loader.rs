//! Configuration loading utilities
//!
//! Environment overrides are applied through a lookup function so the same
//! code path serves the process environment and tests.

use super::Config;
use super::models::{ProviderConfig, ProviderKind};
use crate::utils::error::{RelayError, Result};
use std::str::FromStr;
use tracing::debug;

/// Environment variable names per provider kind: key, model, base URL
fn provider_env_vars(kind: ProviderKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        ProviderKind::OpenAi => ("OPENAI_API_KEY", "OPENAI_MODEL", "OPENAI_BASE_URL"),
        ProviderKind::Gemini => ("GEMINI_API_KEY", "GEMINI_MODEL", "GEMINI_BASE_URL"),
        ProviderKind::HuggingFace => (
            "HUGGINGFACE_TOKEN",
            "HUGGINGFACE_MODEL",
            "HUGGINGFACE_BASE_URL",
        ),
        ProviderKind::Ollama => ("", "OLLAMA_MODEL", "OLLAMA_URL"),
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| RelayError::Config(format!("Invalid {}: {}", name, e))),
        None => Ok(None),
    }
}

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server configuration
        if let Some(host) = lookup("RELAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "RELAY_PORT")? {
            self.server.port = port;
        }
        if let Some(workers) = parse_var(&lookup, "RELAY_WORKERS")? {
            self.server.workers = Some(workers);
        }
        if let Some(secret) = lookup("SESSION_SECRET") {
            self.server.session_secret = Some(secret);
        }

        // Messaging configuration
        if let Some(token) = lookup("LINE_CHANNEL_ACCESS_TOKEN") {
            self.messaging.channel_access_token = Some(token);
        }
        if let Some(secret) = lookup("LINE_CHANNEL_SECRET") {
            self.messaging.channel_secret = Some(secret);
        }
        if let Some(api_base) = lookup("LINE_API_BASE") {
            self.messaging.api_base = api_base;
        }

        // Orchestrator configuration
        if let Some(threshold) = parse_var(&lookup, "RELAY_DISABLE_THRESHOLD")? {
            self.orchestrator.disable_threshold = threshold;
        }
        if let Some(cooldown) = parse_var(&lookup, "RELAY_COOLDOWN_SECS")? {
            self.orchestrator.cooldown_secs = cooldown;
        }
        if let Some(timeout) = parse_var(&lookup, "RELAY_PROVIDER_TIMEOUT_SECS")? {
            self.orchestrator.provider_timeout_secs = timeout;
        }
        if let Some(message) = lookup("RELAY_FALLBACK_MESSAGE") {
            self.orchestrator.fallback_message = message;
        }
        if let Some(prompt) = lookup("RELAY_SYSTEM_PROMPT") {
            self.orchestrator.system_prompt = prompt;
        }

        for kind in ProviderKind::ALL {
            self.apply_provider_overrides(kind, &lookup);
        }

        debug!("Environment overrides applied");
        Ok(())
    }

    fn apply_provider_overrides<F>(&mut self, kind: ProviderKind, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let (key_var, model_var, url_var) = provider_env_vars(kind);
        let api_key = if key_var.is_empty() {
            None
        } else {
            lookup(key_var)
        };
        let model = lookup(model_var);
        let base_url = lookup(url_var);

        if api_key.is_none() && model.is_none() && base_url.is_none() {
            return;
        }

        let index = match self.providers.iter().position(|p| p.kind == kind) {
            Some(index) => index,
            None => {
                self.providers.push(ProviderConfig::new(kind));
                self.providers.len() - 1
            }
        };
        let provider = &mut self.providers[index];
        if api_key.is_some() {
            provider.api_key = api_key;
        }
        if model.is_some() {
            provider.model = model;
        }
        if base_url.is_some() {
            provider.base_url = base_url;
        }
    }
}
