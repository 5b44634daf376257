//! # Paddock
//!
//! Paddock is a client SDK and MCP (Model Context Protocol) tool binding
//! for the Racing Drivers API, a small REST service that stores drivers and
//! the laps they have driven.
//!
//! ## Features
//!
//! - **SDK**: [`RacingClient`](client::RacingClient) exposes every endpoint
//!   as an async method returning typed models
//! - **Tool bindings**: [`PaddockServer`](server::PaddockServer) exposes the
//!   same operations as MCP tools with JSON Schema arguments and
//!   human-readable results
//! - **Error handling**: one [`RacingError`](error::RacingError) type that
//!   distinguishes not-found, rejected input, transport and server failures
//! - **Security**: the optional bearer token is never logged and is redacted
//!   from error messages
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with message sanitization
//! - [`models`] - Drivers, laps, request bodies and response decoding
//! - [`client`] - HTTP client for the Racing Drivers API
//! - [`tools`] - Tool input parameter structs
//! - [`server`] - MCP server implementation with tool routing
//!
//! ## Configuration
//!
//! - `RACING_API_BASE_URL` (required): base URL of the API
//! - `RACING_API_TOKEN` (optional): bearer token
//! - `RACING_API_TIMEOUT_SECS` (optional): per-request timeout, default 30
//! - `RUST_LOG` (optional): log filter (e.g., `paddock=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use paddock::client::RacingClient;
//! use paddock::models::{DriverCreate, LapCreate};
//!
//! async fn example() -> Result<(), paddock::error::RacingError> {
//!     let client = RacingClient::with_base_url("http://localhost:8000")?;
//!
//!     let driver = client.create_driver(&DriverCreate::new("Lando Norris")).await?;
//!     let driver_id = driver.display_id().to_string();
//!     client
//!         .create_lap(&driver_id, &LapCreate::new(87.1, "Silverstone"))
//!         .await?;
//!
//!     let driver = client.get_driver(&driver_id).await?;
//!     if let Some(best) = driver.best_lap() {
//!         println!("{} best: {}", driver.name, best.display_lap_time());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tools;
