//! Reply and attempt types produced by the orchestrator

use crate::core::types::{FailureKind, GenerationResult, ProviderId};
use serde::Serialize;

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// A provider produced the reply
    Answered,
    /// The input was empty; no provider was asked
    Apology,
    /// Every provider failed, or none is configured
    Fallback,
}

/// One provider call made while serving a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub provider: ProviderId,
    /// `None` when the call succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u64,
}

impl Attempt {
    pub(crate) fn new(provider: ProviderId, outcome: &GenerationResult, elapsed_ms: u64) -> Self {
        let (failure_kind, detail) = match outcome {
            GenerationResult::Success { .. } => (None, None),
            GenerationResult::Failure { kind, detail } => (Some(*kind), Some(detail.clone())),
        };
        Self {
            provider,
            failure_kind,
            detail,
            elapsed_ms,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure_kind.is_none()
    }
}

/// The reply text plus how it was obtained
///
/// Execution metadata covering which provider answered and every attempt
/// made along the way, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayReply {
    /// Text to send back to the user; never empty
    pub text: String,
    /// Provider that produced `text`, if any
    pub provider: Option<ProviderId>,
    pub outcome: ReplyOutcome,
    pub attempts: Vec<Attempt>,
}

impl RelayReply {
    pub(crate) fn answered(text: String, provider: ProviderId, attempts: Vec<Attempt>) -> Self {
        Self {
            text,
            provider: Some(provider),
            outcome: ReplyOutcome::Answered,
            attempts,
        }
    }

    pub(crate) fn apology(text: String) -> Self {
        Self {
            text,
            provider: None,
            outcome: ReplyOutcome::Apology,
            attempts: Vec::new(),
        }
    }

    pub(crate) fn fallback(text: String, attempts: Vec<Attempt>) -> Self {
        Self {
            text,
            provider: None,
            outcome: ReplyOutcome::Fallback,
            attempts,
        }
    }
}
