//! HTTP client for the Racing Drivers API.
//!
//! This module provides `RacingClient`, which exposes every API endpoint as
//! an async method. Each call is a single attempt: transient failures are
//! reported (see [`RacingError::is_transient`]) but never retried here.
//!
//! # Security
//!
//! The bearer token is never logged. Error bodies are sanitized before they
//! are stored in an error.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::RacingError;
use crate::models::{
    ApiResponse, DeleteResponse, Driver, DriverCreate, DriverUpdate, Lap, LapCreate, LapUpdate,
};

/// Maximum length of a driver or lap identifier.
const MAX_ID_LEN: usize = 64;

/// HTTP client for the Racing Drivers API.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = RacingClient::new(&config)?;
///
/// let driver = client.create_driver(&DriverCreate::new("Lando Norris")).await?;
/// let lap = client
///     .create_lap(driver.display_id(), &LapCreate::new(87.1, "Silverstone"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct RacingClient {
    /// The underlying HTTP client.
    http: Client,

    /// Base URL without trailing slash.
    base_url: String,

    /// Optional bearer token.
    /// SECURITY: Never log this value!
    token: Option<String>,

    /// Timeout applied to each request, reported in `Timeout` errors.
    timeout: Duration,
}

impl RacingClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, RacingError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RacingError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token().map(str::to_string),
            timeout: config.timeout,
        })
    }

    /// Creates a client for `base_url` with no token and default settings.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::Config` if the URL is invalid.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RacingError> {
        Self::new(&Config::new(base_url, None)?)
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the token for sanitization purposes, or `""` when none is set.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn secret_for_sanitization(&self) -> &str {
        self.token.as_deref().unwrap_or("")
    }

    /// Validates an identifier before it is interpolated into a path.
    fn validate_id(id: &str, field_name: &str) -> Result<(), RacingError> {
        let valid = !id.is_empty()
            && id.len() <= MAX_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(RacingError::validation(format!(
                "{} must be 1-{} characters of letters, digits, '-' or '_', got: {:?}",
                field_name,
                MAX_ID_LEN,
                id.chars().take(50).collect::<String>()
            )));
        }
        Ok(())
    }

    fn driver_path(driver_id: &str) -> Result<String, RacingError> {
        Self::validate_id(driver_id, "driver_id")?;
        Ok(format!("/drivers/{}", urlencoding::encode(driver_id)))
    }

    fn lap_path(driver_id: &str, lap_id: &str) -> Result<String, RacingError> {
        let driver = Self::driver_path(driver_id)?;
        Self::validate_id(lap_id, "lap_id")?;
        Ok(format!("{}/laps/{}", driver, urlencoding::encode(lap_id)))
    }

    /// Tests connectivity to the API by listing drivers.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::ConnectionTest` describing why the API could not
    /// be used.
    pub async fn test_connection(&self) -> Result<(), RacingError> {
        tracing::debug!("Testing connection to Racing Drivers API");

        match self.list_drivers().await {
            Ok(drivers) => {
                tracing::info!(drivers = drivers.len(), "Connection test successful");
                Ok(())
            }
            Err(RacingError::Timeout { duration, .. }) => Err(RacingError::connection_test(format!(
                "Connection timed out after {:?} - verify RACING_API_BASE_URL is correct and the API is reachable",
                duration
            ))),
            Err(RacingError::Http(e)) => {
                let message = RacingError::sanitize_message(&e.to_string(), self.secret_for_sanitization());
                Err(RacingError::connection_test(format!(
                    "HTTP error: {} - verify RACING_API_BASE_URL is correct",
                    message
                )))
            }
            Err(e) => Err(RacingError::connection_test(
                e.sanitized_display(self.secret_for_sanitization()),
            )),
        }
    }

    // ========================================================================
    // Drivers
    // ========================================================================

    /// Creates a driver.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::Validation` if the name is blank or too long.
    pub async fn create_driver(&self, body: &DriverCreate) -> Result<Driver, RacingError> {
        body.validate()?;
        self.send(Method::POST, "/drivers", Some(body)).await
    }

    /// Lists all drivers with their laps.
    pub async fn list_drivers(&self) -> Result<Vec<Driver>, RacingError> {
        self.send(Method::GET, "/drivers", None::<&()>).await
    }

    /// Gets a single driver with their laps.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::NotFound` if the driver doesn't exist.
    pub async fn get_driver(&self, driver_id: &str) -> Result<Driver, RacingError> {
        let path = Self::driver_path(driver_id)?;
        self.send(Method::GET, &path, None::<&()>).await
    }

    /// Renames a driver.
    pub async fn update_driver(
        &self,
        driver_id: &str,
        body: &DriverUpdate,
    ) -> Result<Driver, RacingError> {
        let path = Self::driver_path(driver_id)?;
        body.validate()?;
        self.send(Method::PUT, &path, Some(body)).await
    }

    /// Deletes a driver and all of their laps.
    ///
    /// Returns the server's confirmation message.
    pub async fn delete_driver(&self, driver_id: &str) -> Result<String, RacingError> {
        let path = Self::driver_path(driver_id)?;
        let response: DeleteResponse = self.send(Method::DELETE, &path, None::<&()>).await?;
        Ok(response.detail)
    }

    // ========================================================================
    // Laps
    // ========================================================================

    /// Records a lap for a driver.
    pub async fn create_lap(&self, driver_id: &str, body: &LapCreate) -> Result<Lap, RacingError> {
        let path = format!("{}/laps", Self::driver_path(driver_id)?);
        body.validate()?;
        self.send(Method::POST, &path, Some(body)).await
    }

    /// Lists a driver's laps.
    pub async fn list_laps(&self, driver_id: &str) -> Result<Vec<Lap>, RacingError> {
        let path = format!("{}/laps", Self::driver_path(driver_id)?);
        self.send(Method::GET, &path, None::<&()>).await
    }

    /// Gets a single lap belonging to a driver.
    ///
    /// # Errors
    ///
    /// Returns `RacingError::NotFound` if the lap doesn't exist or belongs to
    /// another driver.
    pub async fn get_lap(&self, driver_id: &str, lap_id: &str) -> Result<Lap, RacingError> {
        let path = Self::lap_path(driver_id, lap_id)?;
        self.send(Method::GET, &path, None::<&()>).await
    }

    /// Replaces a lap's time and track.
    pub async fn update_lap(
        &self,
        driver_id: &str,
        lap_id: &str,
        body: &LapUpdate,
    ) -> Result<Lap, RacingError> {
        let path = Self::lap_path(driver_id, lap_id)?;
        body.validate()?;
        self.send(Method::PUT, &path, Some(body)).await
    }

    /// Deletes a lap. Returns the server's confirmation message.
    pub async fn delete_lap(&self, driver_id: &str, lap_id: &str) -> Result<String, RacingError> {
        let path = Self::lap_path(driver_id, lap_id)?;
        let response: DeleteResponse = self.send(Method::DELETE, &path, None::<&()>).await?;
        Ok(response.detail)
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Sends one request and decodes the response.
    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, RacingError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(method = %method, path = %path, "Making Racing API request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header("Accept", "application/json");

        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.transport_error(e, &method, path))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, &method, path))?;

        tracing::trace!(
            status = %status,
            body = %RacingError::sanitize_message(&text, self.secret_for_sanitization()),
            "Racing API response"
        );

        // Success bodies are data and stay untouched; error bodies end up in messages.
        let text = if status.is_success() {
            text
        } else {
            RacingError::sanitize_message(&text, self.secret_for_sanitization())
        };

        let result = ApiResponse::new(status, text).into_result();
        if let Err(ref e) = result {
            tracing::debug!(
                method = %method,
                path = %path,
                status = %status,
                error = %e,
                "Racing API request failed"
            );
        }
        result
    }

    /// Maps a reqwest failure, turning timeouts into `RacingError::Timeout`.
    fn transport_error(&self, e: reqwest::Error, method: &Method, path: &str) -> RacingError {
        if e.is_timeout() {
            return RacingError::timeout(self.timeout, format!("{} {}", method, path));
        }
        RacingError::Http(e)
    }
}
