//! Core functionality for the relay
//!
//! This module contains the provider adapters, health tracking and the
//! orchestrator that ties them together.

pub mod health;
pub mod orchestrator;
pub mod providers;
pub mod traits;
pub mod types;

pub use health::HealthTracker;
pub use orchestrator::{Orchestrator, RelayReply};
pub use traits::TextProvider;
