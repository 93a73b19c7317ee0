//! Health record and disable policy
//!
//! A record only stores what happened; whether a provider is currently
//! disabled is derived from those fields and a caller-supplied instant.

use crate::core::types::{FailureKind, GenerationResult, ProviderId};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::time::Duration;

/// Default number of consecutive failures before a provider is benched
pub const DEFAULT_DISABLE_THRESHOLD: u32 = 3;

/// Default time a benched provider waits before its probe attempt
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

/// Disable policy applied to every health record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthPolicy {
    /// Consecutive failures at which a provider becomes disabled
    pub disable_threshold: u32,
    /// How long after its last failure a disabled provider stays benched
    pub cooldown: Duration,
}

impl HealthPolicy {
    fn cooldown_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.cooldown).unwrap_or(TimeDelta::MAX)
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            disable_threshold: DEFAULT_DISABLE_THRESHOLD,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

/// Recent outcome history of one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthRecord {
    /// Provider identifier
    pub provider_id: ProviderId,
    /// Failures since the last success
    pub consecutive_failures: u32,
    /// When the provider last failed
    pub last_failure_time: Option<DateTime<Utc>>,
    /// When the provider last succeeded
    pub last_success_time: Option<DateTime<Utc>>,
    /// Kind of the most recent failure
    pub last_failure_kind: Option<FailureKind>,
    /// Lifetime successes since boot
    pub total_successes: u64,
    /// Lifetime failures since boot
    pub total_failures: u64,
}

impl HealthRecord {
    pub fn new(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            consecutive_failures: 0,
            last_failure_time: None,
            last_success_time: None,
            last_failure_kind: None,
            total_successes: 0,
            total_failures: 0,
        }
    }

    /// Fold one outcome into the record
    pub(crate) fn apply(&mut self, outcome: &GenerationResult, at: DateTime<Utc>) {
        match outcome {
            GenerationResult::Success { .. } => {
                self.consecutive_failures = 0;
                self.last_success_time = Some(at);
                self.total_successes += 1;
            }
            GenerationResult::Failure { kind, .. } => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.last_failure_time = Some(at);
                self.last_failure_kind = Some(*kind);
                self.total_failures += 1;
            }
        }
    }

    /// Whether the provider is benched at `now`
    pub fn is_disabled(&self, policy: &HealthPolicy, now: DateTime<Utc>) -> bool {
        if self.consecutive_failures < policy.disable_threshold {
            return false;
        }
        match self.last_failure_time {
            Some(failed_at) => now.signed_duration_since(failed_at) < policy.cooldown_delta(),
            None => false,
        }
    }
}

/// Read-only view handed to status endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    #[serde(flatten)]
    pub record: HealthRecord,
    pub is_disabled: bool,
}
