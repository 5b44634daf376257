//! Tool input parameter structs for MCP tools.
//!
//! Each struct derives `JsonSchema` so the tool's argument schema is
//! published during MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from string fields. Call it before processing input.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Default number of drivers returned by list_drivers.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Upper bound for list_drivers limit.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// ============================================================================
// Drivers
// ============================================================================

/// Input parameters for the list_drivers tool.
///
/// All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListDriversInput {
    /// Only return drivers whose name contains this text (case-insensitive).
    #[serde(default)]
    pub name_contains: Option<String>,

    /// Maximum number of drivers to return (default: 20, max: 100).
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListDriversInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name_contains: trim_option(&self.name_contains),
            limit: self.limit,
        }
    }

    /// Returns the effective limit, clamped to `1..=MAX_LIST_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT) as usize
    }
}

/// Input parameters for tools addressing a single driver.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriverIdInput {
    /// The unique ID of the driver.
    pub driver_id: String,
}

impl DriverIdInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            driver_id: self.driver_id.trim().to_string(),
        }
    }
}

/// Input parameters for the create_driver tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDriverInput {
    /// Driver's full name (required, max 100 characters).
    pub name: String,
}

impl CreateDriverInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Input parameters for the update_driver tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDriverInput {
    /// The unique ID of the driver to update.
    pub driver_id: String,

    /// New full name for the driver (max 100 characters).
    #[serde(default)]
    pub name: Option<String>,
}

impl UpdateDriverInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            driver_id: self.driver_id.trim().to_string(),
            name: trim_option(&self.name),
        }
    }

    /// Returns true if there is something to change.
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
    }
}

// ============================================================================
// Laps
// ============================================================================

/// Input parameters for tools addressing a single lap.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LapIdInput {
    /// The ID of the driver who owns the lap.
    pub driver_id: String,

    /// The ID of the lap.
    pub lap_id: String,
}

impl LapIdInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            driver_id: self.driver_id.trim().to_string(),
            lap_id: self.lap_id.trim().to_string(),
        }
    }
}

/// Input parameters for the create_lap tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateLapInput {
    /// The ID of the driver who drove the lap.
    pub driver_id: String,

    /// Lap time in seconds (e.g., 85.4 for 1:25.400).
    pub lap_time: f64,

    /// Track name (e.g., "Silverstone", "Monza").
    pub track: String,
}

impl CreateLapInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            driver_id: self.driver_id.trim().to_string(),
            lap_time: self.lap_time,
            track: self.track.trim().to_string(),
        }
    }
}

/// Input parameters for the update_lap tool.
///
/// Fields that are omitted keep their current value.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateLapInput {
    /// The ID of the driver who owns the lap.
    pub driver_id: String,

    /// The ID of the lap to update.
    pub lap_id: String,

    /// New lap time in seconds.
    #[serde(default)]
    pub lap_time: Option<f64>,

    /// New track name.
    #[serde(default)]
    pub track: Option<String>,
}

impl UpdateLapInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            driver_id: self.driver_id.trim().to_string(),
            lap_id: self.lap_id.trim().to_string(),
            lap_time: self.lap_time,
            track: trim_option(&self.track),
        }
    }

    /// Returns true if at least one field is being changed.
    pub fn has_updates(&self) -> bool {
        self.lap_time.is_some() || self.track.is_some()
    }
}
