//! Paddock - MCP server for the Racing Drivers API
//!
//! This binary runs as an MCP server over stdio, exposing driver and lap
//! operations as tools.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `RACING_API_BASE_URL`: Base URL of the Racing Drivers API
//! - `RACING_API_TOKEN`: Optional bearer token
//! - `RACING_API_TIMEOUT_SECS`: Optional request timeout in seconds
//!
//! # Usage
//!
//! ```bash
//! RACING_API_BASE_URL=http://localhost:8000 ./paddock
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use paddock::{client, config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paddock=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Paddock MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Configuration loaded");

    let client = client::RacingClient::new(&config).context("Failed to create API client")?;

    tracing::info!("Testing connection to the Racing Drivers API...");
    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        // Keep serving; the API may come up later.
        tracing::warn!(
            "Server will start but may not be able to reach the Racing Drivers API. \
             Check RACING_API_BASE_URL and network connectivity."
        );
    }

    let server = server::PaddockServer::new(client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
