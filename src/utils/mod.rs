//! Utility modules for the relay
//!
//! ## Module Organization
//!
//! - **error**: Service error type and its HTTP mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use logging::{LoggingConfig, init_logging};
