//! AI provider implementations
//!
//! One [`TextProvider`](crate::core::traits::TextProvider) implementation per
//! vendor, plus the registry that builds them from configuration.

pub mod error;
pub mod gemini;
pub mod huggingface;
pub mod ollama;
pub mod openai;
pub mod registry;
mod shared;

pub use error::ProviderFailure;
pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use registry::{ProviderRegistry, build_provider};
