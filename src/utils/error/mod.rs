//! Error handling for the relay
//!
//! This module defines the service-level error type and its HTTP mapping.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{RelayError, Result};
