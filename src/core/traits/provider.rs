//! Text provider trait
//!
//! Every AI backend is one implementation of [`TextProvider`]. Adding a
//! backend means adding an implementation and registering it; the
//! orchestrator only ever sees this trait.

use crate::config::ProviderKind;
use crate::core::types::{GenerationRequest, GenerationResult, ProviderId};
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// A single remote text-generation backend
///
/// # Contract
///
/// - One call to [`generate`](TextProvider::generate) makes exactly one
///   outbound request and never retries.
/// - The call finishes within `timeout`; running over yields
///   `Failure { kind: Timeout, .. }`.
/// - `Success` always carries non-empty, trimmed text. Any other upstream
///   shape is normalized into a `Failure`.
#[async_trait]
pub trait TextProvider: Send + Sync + Debug + 'static {
    /// Identifier used by the health tracker
    fn id(&self) -> &ProviderId;

    /// Adapter family
    fn kind(&self) -> ProviderKind;

    /// Time budget override, if the provider was configured with one
    fn timeout_override(&self) -> Option<Duration> {
        None
    }

    /// Generate a reply for one request
    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> GenerationResult;
}
