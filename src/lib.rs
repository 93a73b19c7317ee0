//! # LINE Relay
//!
//! Answers LINE chat messages through a chain of AI text-generation
//! providers, failing over between them based on their recent health.
//!
//! ## Features
//!
//! - **Multi-Provider**: OpenAI, Google Gemini, Hugging Face and Ollama behind one trait
//! - **Health-Aware Failover**: providers that keep failing are benched for a cooldown
//! - **Never Errors to Users**: every message gets a completion or a fixed fallback reply
//! - **LINE Webhook**: signature-verified deliveries, replies through the reply API
//!
//! ## Relay Mode
//!
//! ```rust,no_run
//! use line_relay::{Config, Relay};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let relay = Relay::new(config)?;
//!     relay.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Orchestrator Only
//!
//! ```rust,no_run
//! use line_relay::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_config(&Config::from_env()?)?;
//!     println!("{}", orchestrator.respond("你好").await);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod messaging;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::health::{HealthPolicy, HealthTracker};
pub use core::orchestrator::{Orchestrator, RelayReply, ReplyOutcome};
pub use core::providers::ProviderRegistry;
pub use core::traits::TextProvider;
pub use core::types::{FailureKind, GenerationRequest, GenerationResult, ProviderId};
pub use utils::error::{RelayError, Result};

use tracing::{debug, info};

/// The relay service: configuration plus its HTTP server
pub struct Relay {
    config: Config,
    server: server::HttpServer,
}

impl Relay {
    /// Create a new relay instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new relay instance");

        let server = server::HttpServer::new(&config)?;
        Ok(Self { config, server })
    }

    /// Run the relay server
    pub async fn run(self) -> Result<()> {
        info!("Starting LINE relay");
        debug!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
