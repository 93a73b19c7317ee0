//! Provider health tracking
//!
//! Keeps one in-memory record per configured provider and turns those
//! records into an attempt order for the orchestrator.
//!
//! # Module Structure
//!
//! - `types` - Health records and the disable policy
//! - `tracker` - The shared tracker and its `record()` write path
//! - `routing` - Health-based provider ordering
//! - `tests` - Test suite for health tracking

pub mod routing;
pub mod tracker;
pub mod types;

pub use tracker::HealthTracker;
pub use types::{
    DEFAULT_COOLDOWN, DEFAULT_DISABLE_THRESHOLD, HealthPolicy, HealthRecord, ProviderStatus,
};
