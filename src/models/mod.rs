//! Data models for the Racing Drivers API.
//!
//! This module contains the driver and lap resources, their request
//! bodies, and the response envelopes shared by every endpoint.

mod common;
mod driver;
mod lap;

pub use common::*;
pub use driver::*;
pub use lap::*;

use crate::error::RacingError;

/// Maximum length accepted for names and track labels.
pub const MAX_LABEL_LEN: usize = 100;

/// Checks that a free-text field is non-blank and reasonably short.
pub(crate) fn validate_label(field: &str, value: &str) -> Result<(), RacingError> {
    if value.trim().is_empty() {
        return Err(RacingError::validation(format!(
            "{} is required and cannot be empty",
            field
        )));
    }
    let len = value.chars().count();
    if len > MAX_LABEL_LEN {
        return Err(RacingError::validation(format!(
            "{} exceeds maximum length of {} characters (got {})",
            field, MAX_LABEL_LEN, len
        )));
    }
    Ok(())
}
