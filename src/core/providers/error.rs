//! Adapter-internal failure type
//!
//! Adapters build their reply with `Result<String, ProviderFailure>` so `?`
//! works through request, status and parsing steps; the trait boundary turns
//! it into a [`GenerationResult`].

use crate::core::types::{FailureKind, GenerationResult};
use thiserror::Error;

/// A normalized provider failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ProviderFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidResponse, detail)
    }

    pub fn auth(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::AuthError, detail)
    }

    pub fn rate_limited(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::RateLimited, detail)
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::NetworkError, detail)
    }
}

impl From<ProviderFailure> for GenerationResult {
    fn from(failure: ProviderFailure) -> Self {
        GenerationResult::failure(failure.kind, failure.detail)
    }
}

impl From<serde_json::Error> for ProviderFailure {
    fn from(error: serde_json::Error) -> Self {
        Self::invalid_response(format!("Malformed response payload: {}", error))
    }
}
