//! Configuration management for Paddock.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use crate::error::RacingError;
use std::env;
use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for `RACING_API_TIMEOUT_SECS`.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Configuration for connecting to the Racing Drivers API.
///
/// The bearer token, when present, is never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the API (e.g., `https://racing.example.com`).
    pub base_url: String,

    /// Optional bearer token forwarded as-is to the HTTP client.
    token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Builds a configuration directly, validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::Config` if the URL is not an absolute http(s) URL
    /// or the token looks like a placeholder.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, RacingError> {
        let base_url = Self::validate_base_url(base_url.into())?;
        let token = token.filter(|t| !t.trim().is_empty());
        if let Some(ref t) = token {
            Self::validate_token(t)?;
        }

        Ok(Config {
            base_url,
            token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RACING_API_BASE_URL` (required): base URL of the API
    /// - `RACING_API_TOKEN` (optional): bearer token
    /// - `RACING_API_TIMEOUT_SECS` (optional): request timeout, 1-300 seconds
    ///
    /// # Errors
    ///
    /// Returns `RacingError::Config` if a required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, RacingError> {
        let base_url = Self::get_required_env("RACING_API_BASE_URL")?;
        let token = env::var("RACING_API_TOKEN").ok();

        let mut config = Self::new(base_url, token)?;

        if let Ok(raw) = env::var("RACING_API_TIMEOUT_SECS") {
            config.timeout = Self::parse_timeout(&raw)?;
        }

        Ok(config)
    }

    /// Returns the bearer token, if configured.
    ///
    /// Only for attaching to requests and for sanitizing messages.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, RacingError> {
        env::var(name)
            .map_err(|_| RacingError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(RacingError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, RacingError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&url).map_err(|e| {
            RacingError::invalid_config(format!("RACING_API_BASE_URL is not a valid URL: {}", e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RacingError::invalid_config(
                "RACING_API_BASE_URL must start with http:// or https://",
            ));
        }
        if parsed.host_str().is_none() {
            return Err(RacingError::invalid_config(
                "RACING_API_BASE_URL must include a host",
            ));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(RacingError::invalid_config(
                "RACING_API_BASE_URL must not contain a query string or fragment",
            ));
        }

        Ok(url)
    }

    /// Rejects tokens that are obviously copied from an example file.
    fn validate_token(token: &str) -> Result<(), RacingError> {
        let lower = token.to_lowercase();
        let placeholder_patterns = ["your_token", "your-token", "placeholder", "xxx", "changeme"];

        if placeholder_patterns.iter().any(|p| lower.contains(p)) {
            return Err(RacingError::invalid_config(
                "RACING_API_TOKEN appears to be a placeholder value",
            ));
        }

        Ok(())
    }

    fn parse_timeout(raw: &str) -> Result<Duration, RacingError> {
        let secs: u64 = raw.trim().parse().map_err(|_| {
            RacingError::invalid_config("RACING_API_TIMEOUT_SECS must be a whole number of seconds")
        })?;
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            return Err(RacingError::invalid_config(format!(
                "RACING_API_TIMEOUT_SECS must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }
        Ok(Duration::from_secs(secs))
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
