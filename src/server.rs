//! MCP server implementation for Paddock.
//!
//! This module defines `PaddockServer`, which implements the MCP
//! `ServerHandler` trait and exposes each Racing Drivers API operation as a
//! tool.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};

use crate::client::RacingClient;
use crate::error::RacingError;
use crate::models::{format_lap_time, Driver, DriverCreate, DriverUpdate, Lap, LapCreate, LapUpdate};
use crate::tools::{
    CreateDriverInput, CreateLapInput, DriverIdInput, LapIdInput, ListDriversInput,
    UpdateDriverInput, UpdateLapInput,
};

/// The Paddock MCP server.
#[derive(Clone)]
pub struct PaddockServer {
    /// SDK client for API operations.
    client: RacingClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PaddockServer {
    /// Creates a new server instance around an SDK client.
    pub fn new(client: RacingClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Test connectivity to the Paddock MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    // ========================================================================
    // Driver tools
    // ========================================================================

    /// List drivers, optionally filtered by name.
    #[tool(description = "List racing drivers with their lap counts and best lap. Optionally filter by part of the name. Returns driver IDs for use with other tools.")]
    async fn list_drivers(
        &self,
        Parameters(input): Parameters<ListDriversInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "list_drivers tool called");

        let drivers = self
            .client
            .list_drivers()
            .await
            .map_err(|e| self.report("list drivers", &e))?;

        let needle = input.name_contains.as_deref().map(str::to_lowercase);
        let matching: Vec<Driver> = drivers
            .into_iter()
            .filter(|d| {
                needle
                    .as_deref()
                    .is_none_or(|n| d.name.to_lowercase().contains(n))
            })
            .collect();

        Ok(format_driver_list(&matching, input.effective_limit()))
    }

    /// Get one driver with all laps.
    #[tool(description = "Get a racing driver's details including every recorded lap and the best lap per track. Driver ID is required.")]
    async fn get_driver(
        &self,
        Parameters(input): Parameters<DriverIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, "get_driver tool called");

        let driver = self
            .client
            .get_driver(&input.driver_id)
            .await
            .map_err(|e| self.report(&format!("get driver {}", input.driver_id), &e))?;

        Ok(format_driver_details(&driver))
    }

    #[tool(description = "Create a new racing driver. Name is required. Returns the created driver with its assigned ID.")]
    async fn create_driver(
        &self,
        Parameters(input): Parameters<CreateDriverInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_driver tool called");

        let driver = self
            .client
            .create_driver(&DriverCreate::new(input.name))
            .await
            .map_err(|e| self.report("create driver", &e))?;

        Ok(format!(
            "Successfully created driver {} ({}).\n\nNext steps:\n- Record laps with create_lap using driver_id {}\n",
            driver.display_name(),
            driver.display_id(),
            driver.display_id()
        ))
    }

    #[tool(description = "Rename an existing racing driver. Driver ID and the new name are required.")]
    async fn update_driver(
        &self,
        Parameters(input): Parameters<UpdateDriverInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, "update_driver tool called");

        let Some(name) = input.name else {
            return Err("At least one field must be provided for update (name).".to_string());
        };

        let driver = self
            .client
            .update_driver(&input.driver_id, &DriverUpdate::new(name))
            .await
            .map_err(|e| self.report(&format!("update driver {}", input.driver_id), &e))?;

        Ok(format!(
            "Successfully updated driver {}.\n\nCurrent state:\n  Name: {}\n  Laps: {}\n",
            driver.display_id(),
            driver.display_name(),
            driver.laps.len()
        ))
    }

    #[tool(description = "Delete a racing driver and all of their laps. This cannot be undone. Driver ID is required.")]
    async fn delete_driver(
        &self,
        Parameters(input): Parameters<DriverIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, "delete_driver tool called");

        let detail = self
            .client
            .delete_driver(&input.driver_id)
            .await
            .map_err(|e| self.report(&format!("delete driver {}", input.driver_id), &e))?;

        Ok(format!("{} (driver {}).", detail, input.driver_id))
    }

    // ========================================================================
    // Lap tools
    // ========================================================================

    #[tool(description = "List all laps recorded by a driver, fastest first. Driver ID is required.")]
    async fn list_laps(
        &self,
        Parameters(input): Parameters<DriverIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, "list_laps tool called");

        let laps = self
            .client
            .list_laps(&input.driver_id)
            .await
            .map_err(|e| self.report(&format!("list laps for driver {}", input.driver_id), &e))?;

        Ok(format_lap_list(&input.driver_id, laps))
    }

    #[tool(description = "Get a single lap of a driver. Driver ID and lap ID are required.")]
    async fn get_lap(
        &self,
        Parameters(input): Parameters<LapIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, lap_id = %input.lap_id, "get_lap tool called");

        let lap = self
            .client
            .get_lap(&input.driver_id, &input.lap_id)
            .await
            .map_err(|e| self.report(&format!("get lap {}", input.lap_id), &e))?;

        Ok(format_lap_details(&lap))
    }

    #[tool(description = "Record a lap for a driver. Driver ID, lap time in seconds, and track name are required.")]
    async fn create_lap(
        &self,
        Parameters(input): Parameters<CreateLapInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, track = %input.track, "create_lap tool called");

        let lap = self
            .client
            .create_lap(&input.driver_id, &LapCreate::new(input.lap_time, input.track))
            .await
            .map_err(|e| self.report(&format!("record lap for driver {}", input.driver_id), &e))?;

        Ok(format!(
            "Successfully recorded lap {} for driver {}: {} at {}.\n",
            lap.display_id(),
            input.driver_id,
            lap.display_lap_time(),
            lap.track
        ))
    }

    #[tool(description = "Update a lap's time and/or track. Driver ID and lap ID are required; omitted fields keep their current value.")]
    async fn update_lap(
        &self,
        Parameters(input): Parameters<UpdateLapInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, lap_id = %input.lap_id, "update_lap tool called");

        if !input.has_updates() {
            return Err("At least one field must be provided for update (lap_time or track).".to_string());
        }

        // The API replaces the whole lap, so partial updates start from the current one.
        let body = match (input.lap_time, input.track.clone()) {
            (Some(lap_time), Some(track)) => LapUpdate::new(lap_time, track),
            (lap_time, track) => {
                let current = self
                    .client
                    .get_lap(&input.driver_id, &input.lap_id)
                    .await
                    .map_err(|e| self.report(&format!("update lap {}", input.lap_id), &e))?;
                LapUpdate::merged(&current, lap_time, track)
            }
        };

        let lap = self
            .client
            .update_lap(&input.driver_id, &input.lap_id, &body)
            .await
            .map_err(|e| self.report(&format!("update lap {}", input.lap_id), &e))?;

        Ok(format!(
            "Successfully updated lap {}.\n\nCurrent state:\n  Time: {}\n  Track: {}\n",
            lap.display_id(),
            lap.display_lap_time(),
            lap.track
        ))
    }

    #[tool(description = "Delete a single lap of a driver. Driver ID and lap ID are required.")]
    async fn delete_lap(
        &self,
        Parameters(input): Parameters<LapIdInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(driver_id = %input.driver_id, lap_id = %input.lap_id, "delete_lap tool called");

        let detail = self
            .client
            .delete_lap(&input.driver_id, &input.lap_id)
            .await
            .map_err(|e| self.report(&format!("delete lap {}", input.lap_id), &e))?;

        Ok(format!("{} (lap {} of driver {}).", detail, input.lap_id, input.driver_id))
    }

    /// Logs a failed operation and turns it into the tool's error message.
    fn report(&self, action: &str, error: &RacingError) -> String {
        let sanitized = error.sanitized_display(self.client.secret_for_sanitization());
        tracing::error!(error = %sanitized, action = action, "Tool call failed");
        format!("Failed to {}: {}", action, sanitized)
    }
}

#[tool_handler]
impl ServerHandler for PaddockServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Paddock provides access to the Racing Drivers API. \
                 Use list_drivers to find drivers and their IDs, get_driver for laps and \
                 best times, and list_laps / get_lap for individual laps. \
                 Create with create_driver and create_lap, modify with update_driver and \
                 update_lap, and remove with delete_driver and delete_lap. \
                 Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Response formatting helpers
// ============================================================================

fn format_best(driver: &Driver) -> String {
    match driver.best_lap() {
        Some(lap) => format!("{} at {}", lap.display_lap_time(), lap.track),
        None => "no laps".to_string(),
    }
}

/// Formats a list of drivers, showing at most `limit` entries.
fn format_driver_list(drivers: &[Driver], limit: usize) -> String {
    if drivers.is_empty() {
        return "No drivers found matching the criteria.".to_string();
    }

    let mut output = if drivers.len() > limit {
        format!(
            "Found {} driver(s), showing the first {}:\n\n",
            drivers.len(),
            limit
        )
    } else {
        format!("Found {} driver(s):\n\n", drivers.len())
    };

    for driver in drivers.iter().take(limit) {
        output.push_str(&format!("{} - {}\n", driver.display_id(), driver.display_name()));
        output.push_str(&format!(
            "   Laps: {} | Best: {}\n\n",
            driver.laps.len(),
            format_best(driver)
        ));
    }

    output
}

/// Formats a driver with every lap and per-track bests.
fn format_driver_details(driver: &Driver) -> String {
    let mut output = format!("Driver {}: {}\n", driver.display_id(), driver.display_name());
    output.push_str(&"=".repeat(60));
    output.push('\n');

    if driver.laps.is_empty() {
        output.push_str("\nNo laps recorded.\n");
        return output;
    }

    output.push_str(&format!("\nLaps recorded: {}\n", driver.laps.len()));
    output.push_str(&format!("Best lap: {}\n", format_best(driver)));

    output.push_str("\n--- Best by track ---\n");
    for (track, lap) in driver.best_laps_by_track() {
        output.push_str(&format!("{}: {}\n", track, lap.display_lap_time()));
    }

    output.push_str("\n--- Laps ---\n");
    for lap in &driver.laps {
        output.push_str(&format!(
            "{} | {} | {}\n",
            lap.display_id(),
            lap.track,
            lap.display_lap_time()
        ));
    }

    output
}

/// Formats a driver's laps, fastest first.
fn format_lap_list(driver_id: &str, mut laps: Vec<Lap>) -> String {
    if laps.is_empty() {
        return format!("Driver {} has no laps recorded.", driver_id);
    }

    laps.sort_by(|a, b| a.lap_time.total_cmp(&b.lap_time));

    let mut output = format!("Driver {} has {} lap(s), fastest first:\n\n", driver_id, laps.len());
    for (pos, lap) in laps.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} - {} ({})\n",
            pos + 1,
            lap.display_lap_time(),
            lap.track,
            lap.display_id()
        ));
    }
    output
}

fn format_lap_details(lap: &Lap) -> String {
    format!(
        "Lap {}\n  Track: {}\n  Time: {} ({} s)\n",
        lap.display_id(),
        lap.track,
        format_lap_time(lap.lap_time),
        lap.lap_time
    )
}
