//! Error types for the relay

use thiserror::Error;

/// Result type alias for the relay
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for the relay
///
/// Provider failures never surface here: adapters normalize them into
/// [`crate::core::types::GenerationResult`] and the orchestrator recovers
/// from them locally. This enum covers the service around the core.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Webhook signature missing or invalid
    #[error("Signature error: {0}")]
    Signature(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Messaging platform credentials are not configured
    #[error("Messaging unavailable: {0}")]
    MessagingUnavailable(String),

    /// Messaging platform rejected a call
    #[error("Messaging error: {0}")]
    Messaging(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
