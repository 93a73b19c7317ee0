//! Configuration data models
//!
//! This module defines all configuration structures used throughout the relay.

pub mod messaging;
pub mod orchestrator;
pub mod provider;
pub mod server;

pub use messaging::*;
pub use orchestrator::*;
pub use provider::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    5000
}

/// Render an optional secret for `Debug` output without leaking it
pub(crate) fn redact(secret: &Option<String>) -> &'static str {
    match secret {
        Some(value) if !value.is_empty() => "***REDACTED***",
        _ => "<unset>",
    }
}
