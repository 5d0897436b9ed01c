//! TfL Unified API HTTP client.
//!
//! Provides async methods for the four endpoints the bot uses: network
//! status, single-line status, stop point search, and arrivals.

use serde::de::DeserializeOwned;

use super::api::TransitApi;
use super::error::TflError;
use super::types::{Line, Prediction, StopPointsResponse};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Transit modes the bot reports on.
const MODES: &str = "tube,overground,dlr,tflrail";

/// Radius for the nearby stop point search, in metres.
const STOP_SEARCH_RADIUS: u32 = 1000;

/// Stop point type returned by the radius search (stations, not platforms).
const STOP_TYPE: &str = "NaptanMetroStation";

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Base URL for the API (defaults to production).
    pub base_url: String,
    /// Optional application key for higher rate limits.
    pub app_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a config with default settings (anonymous access).
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set an application key.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_key: config.app_key,
        })
    }

    /// Perform a GET request and deserialize the JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, TflError> {
        let mut request = self.http.get(url).query(query);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TflError::Json {
            message: e.to_string(),
        })
    }
}

impl TransitApi for TflClient {
    /// Get current statuses for every line across the reported modes.
    async fn network_status(&self) -> Result<Vec<Line>, TflError> {
        let url = format!("{}/Line/Mode/{}/Status", self.base_url, MODES);
        self.get_json(&url, &[]).await
    }

    /// Get the status of a single line by canonical identifier.
    ///
    /// Returns `TflError::LineNotFound` when the API reports 404, which is
    /// how it signals an unrecognised identifier.
    async fn line_status(&self, line: &str) -> Result<Vec<Line>, TflError> {
        let url = format!("{}/Line/{}/Status", self.base_url, line);
        match self.get_json(&url, &[]).await {
            Err(TflError::Api { status: 404, .. }) => Err(TflError::LineNotFound),
            other => other,
        }
    }

    /// Find stations near a coordinate.
    ///
    /// Searches within [`STOP_SEARCH_RADIUS`] metres, restricted to the
    /// bot's modes and to station-level stop points.
    async fn stops_near(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<StopPointsResponse, TflError> {
        let url = format!("{}/StopPoint", self.base_url);
        self.get_json(
            &url,
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("radius", STOP_SEARCH_RADIUS.to_string()),
                ("modes", MODES.to_string()),
                ("stopTypes", STOP_TYPE.to_string()),
            ],
        )
        .await
    }

    /// Get arrival predictions for a station by NaPTAN identifier.
    async fn arrivals(&self, stop_id: &str) -> Result<Vec<Prediction>, TflError> {
        let url = format!("{}/StopPoint/{}/Arrivals", self.base_url, stop_id);
        self.get_json(&url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TflConfig::new()
            .with_base_url("http://localhost:8080")
            .with_app_key("test-key")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.app_key.as_deref(), Some("test-key"));
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TflConfig::new();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.app_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = TflClient::new(TflConfig::new());
        assert!(client.is_ok());
    }

    // Integration tests would require real HTTP requests against the
    // public API; they should be marked with #[ignore] and run separately.
}
