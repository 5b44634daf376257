//! Lap models for the Racing Drivers API.
//!
//! A lap is a single timed circuit of a track, owned by exactly one driver.

use serde::{Deserialize, Serialize};

use super::validate_label;
use crate::error::RacingError;

/// A recorded lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    /// Lap ID assigned by the server.
    #[serde(default)]
    pub id: Option<String>,

    /// Lap time in seconds.
    pub lap_time: f64,

    /// Name of the track the lap was driven on.
    pub track: String,
}

impl Lap {
    /// Returns the lap ID or a placeholder when the server omitted it.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("(no id)")
    }

    /// Returns the lap time formatted as `m:ss.mmm`.
    pub fn display_lap_time(&self) -> String {
        format_lap_time(self.lap_time)
    }
}

/// Formats a duration in seconds as `m:ss.mmm`, e.g. `85.4` becomes `1:25.400`.
pub fn format_lap_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return format!("{}s", seconds);
    }
    let total_millis = (seconds * 1000.0).round() as u64;
    let minutes = total_millis / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{}:{:02}.{:03}", minutes, secs, millis)
}

/// Request body for creating a lap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapCreate {
    /// Lap time in seconds.
    pub lap_time: f64,
    /// Track name.
    pub track: String,
}

impl LapCreate {
    /// Creates a new lap body.
    pub fn new(lap_time: f64, track: impl Into<String>) -> Self {
        Self {
            lap_time,
            track: track.into(),
        }
    }

    /// Checks the body before it is sent.
    pub fn validate(&self) -> Result<(), RacingError> {
        validate_lap(self.lap_time, &self.track)
    }
}

/// Request body for replacing a lap. The API requires every field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapUpdate {
    /// Lap time in seconds.
    pub lap_time: f64,
    /// Track name.
    pub track: String,
}

impl LapUpdate {
    /// Creates a new lap update body.
    pub fn new(lap_time: f64, track: impl Into<String>) -> Self {
        Self {
            lap_time,
            track: track.into(),
        }
    }

    /// Builds an update from the current lap, overriding the given fields.
    pub fn merged(current: &Lap, lap_time: Option<f64>, track: Option<String>) -> Self {
        Self {
            lap_time: lap_time.unwrap_or(current.lap_time),
            track: track.unwrap_or_else(|| current.track.clone()),
        }
    }

    /// Checks the body before it is sent.
    pub fn validate(&self) -> Result<(), RacingError> {
        validate_lap(self.lap_time, &self.track)
    }
}

fn validate_lap(lap_time: f64, track: &str) -> Result<(), RacingError> {
    if !lap_time.is_finite() || lap_time <= 0.0 {
        return Err(RacingError::validation(format!(
            "lap_time must be a positive number of seconds, got {}",
            lap_time
        )));
    }
    validate_label("track", track)
}
