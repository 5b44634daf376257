//! MCP tool inputs for Paddock.
//!
//! This module contains the input types for the MCP tools that expose
//! Racing Drivers API operations.

mod inputs;

pub use inputs::*;
