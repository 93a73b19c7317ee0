//! Process-wide health tracker
//!
//! The provider set is fixed when the tracker is built. Each record sits
//! behind its own lock so a `record()` call is a single mutation of exactly
//! one provider, while readers only ever hold one lock at a time.

use super::types::{HealthPolicy, HealthRecord, ProviderStatus};
use crate::core::types::{GenerationResult, ProviderId};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// In-memory health state for every configured provider
#[derive(Debug)]
pub struct HealthTracker {
    pub(crate) policy: HealthPolicy,
    /// One slot per provider, in configuration order
    pub(crate) slots: Vec<Mutex<HealthRecord>>,
}

impl HealthTracker {
    /// Create a tracker for the given providers
    ///
    /// Duplicate ids are dropped so there is never more than one record per
    /// provider.
    pub fn new(providers: impl IntoIterator<Item = ProviderId>, policy: HealthPolicy) -> Self {
        let mut slots: Vec<Mutex<HealthRecord>> = Vec::new();
        for id in providers {
            if slots.iter().any(|slot| slot.lock().provider_id == id) {
                warn!(provider = %id, "Ignoring duplicate provider id");
                continue;
            }
            slots.push(Mutex::new(HealthRecord::new(id)));
        }
        Self { policy, slots }
    }

    pub fn policy(&self) -> &HealthPolicy {
        &self.policy
    }

    /// Tracked providers in configuration order
    pub fn providers(&self) -> Vec<ProviderId> {
        self.slots
            .iter()
            .map(|slot| slot.lock().provider_id.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record the outcome of one provider call
    pub fn record(&self, provider_id: &ProviderId, outcome: &GenerationResult) {
        self.record_at(provider_id, outcome, Utc::now());
    }

    pub(crate) fn record_at(
        &self,
        provider_id: &ProviderId,
        outcome: &GenerationResult,
        at: DateTime<Utc>,
    ) {
        for slot in &self.slots {
            let mut record = slot.lock();
            if &record.provider_id == provider_id {
                record.apply(outcome, at);
                debug!(
                    provider = %provider_id,
                    success = outcome.is_success(),
                    consecutive_failures = record.consecutive_failures,
                    "Recorded provider outcome"
                );
                return;
            }
        }
        warn!(provider = %provider_id, "Outcome recorded for unknown provider");
    }

    /// Copy of one provider's record
    pub fn get(&self, provider_id: &ProviderId) -> Option<HealthRecord> {
        self.slots.iter().find_map(|slot| {
            let record = slot.lock();
            (&record.provider_id == provider_id).then(|| record.clone())
        })
    }

    /// Read-only copy of every record, evaluated now
    pub fn snapshot(&self) -> Vec<ProviderStatus> {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Vec<ProviderStatus> {
        self.slots
            .iter()
            .map(|slot| {
                let record = slot.lock().clone();
                let is_disabled = record.is_disabled(&self.policy, now);
                ProviderStatus {
                    record,
                    is_disabled,
                }
            })
            .collect()
    }
}
