//! Core traits shared by the provider adapters and the orchestrator

pub mod error_mapper;
pub mod provider;

pub use error_mapper::{DefaultErrorMapper, ErrorMapper};
pub use provider::TextProvider;
