//! Configuration validation
//!
//! Every configuration section validates itself; `Config` walks them all and
//! reports the first problem found.

use super::Config;
use super::models::*;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating relay configuration");

        self.server.validate()?;
        self.messaging.validate()?;
        self.orchestrator.validate()?;

        // Check for duplicate provider names
        let mut provider_names = HashSet::new();
        for provider in &self.providers {
            if !provider_names.insert(&provider.name) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
            provider.validate()?;
        }

        debug!("Relay configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Worker count seems too high (>1000)".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for MessagingConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("LINE API base", &self.api_base)
    }
}

impl Validate for OrchestratorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.disable_threshold == 0 {
            return Err("Disable threshold must be at least 1".to_string());
        }

        if self.provider_timeout_secs == 0 {
            return Err("Provider timeout must be greater than 0".to_string());
        }

        if self.fallback_message.trim().is_empty() {
            return Err("Fallback message cannot be empty".to_string());
        }

        if self.apology_message.trim().is_empty() {
            return Err("Apology message cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }

        if let Some(base_url) = &self.base_url {
            validate_http_url(&format!("Provider {} base URL", self.name), base_url)?;
        }

        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(format!("Provider {} model cannot be empty", self.name));
        }

        if self.timeout_secs == Some(0) {
            return Err(format!(
                "Provider {} timeout must be greater than 0",
                self.name
            ));
        }

        Ok(())
    }
}

fn validate_http_url(what: &str, raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("{} is not a valid URL: {}", what, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("{} must use http or https, got {}", what, scheme)),
    }
}
