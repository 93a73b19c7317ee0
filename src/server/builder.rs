//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{RelayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| RelayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

/// Build the server from `config` and run until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!(
        configured = config.configured_providers().count(),
        messaging = config.messaging.is_configured(),
        "Starting LINE relay"
    );

    let server = ServerBuilder::new().with_config(config).build()?;
    info!("API Endpoints:");
    info!("   POST /webhook - LINE webhook");
    info!("   GET  /health - Health check");
    info!("   GET  /api/providers - Provider health");
    info!("   POST /api/test-message - Relay a test message");

    server.start().await
}
