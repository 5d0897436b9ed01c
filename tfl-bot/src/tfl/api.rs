//! Abstraction over the TfL backend.
//!
//! The router talks to the API through this trait, so handlers can be
//! exercised against canned data (`MockTflClient`) as well as the live
//! client.

use super::error::TflError;
use super::types::{Line, Prediction, StopPointsResponse};

/// The four TfL queries the bot makes.
#[allow(async_fn_in_trait)]
pub trait TransitApi {
    /// Current statuses for every line across the reported modes.
    async fn network_status(&self) -> Result<Vec<Line>, TflError>;

    /// Status of a single line by canonical identifier.
    ///
    /// Unknown identifiers yield `TflError::LineNotFound`.
    async fn line_status(&self, line: &str) -> Result<Vec<Line>, TflError>;

    /// Stations near a coordinate.
    async fn stops_near(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<StopPointsResponse, TflError>;

    /// Arrival predictions for a station by NaPTAN identifier.
    async fn arrivals(&self, stop_id: &str) -> Result<Vec<Prediction>, TflError>;
}
