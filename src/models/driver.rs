//! Driver models for the Racing Drivers API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{validate_label, Lap};
use crate::error::RacingError;

/// A racing driver together with their recorded laps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Driver ID assigned by the server.
    #[serde(default)]
    pub id: Option<String>,

    /// Driver name.
    pub name: String,

    /// Laps recorded for this driver.
    #[serde(default)]
    pub laps: Vec<Lap>,
}

impl Driver {
    /// Returns the driver ID or a placeholder when the server omitted it.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("(no id)")
    }

    /// Returns the driver name, or a placeholder for a blank name.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "(unnamed)"
        } else {
            &self.name
        }
    }

    /// Returns the fastest lap across all tracks.
    pub fn best_lap(&self) -> Option<&Lap> {
        self.laps
            .iter()
            .filter(|l| l.lap_time.is_finite())
            .min_by(|a, b| a.lap_time.total_cmp(&b.lap_time))
    }

    /// Returns the fastest lap per track, ordered by track name.
    pub fn best_laps_by_track(&self) -> BTreeMap<&str, &Lap> {
        let mut best: BTreeMap<&str, &Lap> = BTreeMap::new();
        for lap in self.laps.iter().filter(|l| l.lap_time.is_finite()) {
            best.entry(lap.track.as_str())
                .and_modify(|current| {
                    if lap.lap_time < current.lap_time {
                        *current = lap;
                    }
                })
                .or_insert(lap);
        }
        best
    }
}

/// Request body for creating a driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverCreate {
    /// Driver name.
    pub name: String,
}

impl DriverCreate {
    /// Creates a new driver body.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Checks the body before it is sent.
    pub fn validate(&self) -> Result<(), RacingError> {
        validate_label("name", &self.name)
    }
}

/// Request body for renaming a driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverUpdate {
    /// New driver name.
    pub name: String,
}

impl DriverUpdate {
    /// Creates a new driver update body.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Checks the body before it is sent.
    pub fn validate(&self) -> Result<(), RacingError> {
        validate_label("name", &self.name)
    }
}
