//! Integration tests for line-relay
//!
//! These tests wire the public components together the way the server does,
//! with scripted providers or wiremock servers in place of real vendors.

pub mod config_tests;
pub mod provider_tests;
pub mod webhook_tests;
