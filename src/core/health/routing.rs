//! Health-based provider ordering

use super::tracker::HealthTracker;
use crate::core::types::ProviderId;
use chrono::{DateTime, Utc};

impl HealthTracker {
    /// Providers in the order they should be attempted right now
    pub fn ordered_providers(&self) -> Vec<ProviderId> {
        self.ordered_providers_at(Utc::now())
    }

    /// Providers ordered for the given instant
    ///
    /// Enabled before disabled, then fewest consecutive failures, then
    /// configuration order. A provider whose cooldown has lapsed still
    /// carries its failure count and therefore lands at the back of the
    /// enabled group.
    pub fn ordered_providers_at(&self, now: DateTime<Utc>) -> Vec<ProviderId> {
        let mut candidates: Vec<(bool, u32, usize, ProviderId)> = self
            .slots
            .iter()
            .enumerate()
            .map(|(position, slot)| {
                let record = slot.lock();
                (
                    record.is_disabled(&self.policy, now),
                    record.consecutive_failures,
                    position,
                    record.provider_id.clone(),
                )
            })
            .collect();

        candidates.sort_by_key(|(disabled, failures, position, _)| (*disabled, *failures, *position));
        candidates.into_iter().map(|(_, _, _, id)| id).collect()
    }
}
