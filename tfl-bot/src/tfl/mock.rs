//! Mock TfL client for testing without API access.
//!
//! Serves canned responses through the [`TransitApi`] trait, and can be
//! switched into a failing mode to exercise error paths.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::api::TransitApi;
use super::error::TflError;
use super::types::{Line, Prediction, StopPoint, StopPointsResponse};

/// Mock TfL client serving pre-loaded data.
#[derive(Debug, Clone, Default)]
pub struct MockTflClient {
    lines: Vec<Line>,
    stops: Vec<StopPoint>,
    arrivals: HashMap<String, Vec<Prediction>>,
    failing: Arc<AtomicBool>,
}

impl MockTflClient {
    /// Create an empty mock: no lines, no stops, no arrivals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned lines for status queries.
    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    /// Canned stops for the nearby search.
    pub fn with_stops(mut self, stops: Vec<StopPoint>) -> Self {
        self.stops = stops;
        self
    }

    /// Canned arrival predictions for one station.
    pub fn with_arrivals(
        mut self,
        stop_id: impl Into<String>,
        predictions: Vec<Prediction>,
    ) -> Self {
        self.arrivals.insert(stop_id.into(), predictions);
        self
    }

    /// Switch the mock into or out of failing mode.
    ///
    /// While failing, every call returns a 503-style API error. The flag
    /// is shared between clones, so a clone held by a test can flip the
    /// backend under a client that has already been handed off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), TflError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(TflError::Api {
                status: 503,
                message: "mock backend unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl TransitApi for MockTflClient {
    async fn network_status(&self) -> Result<Vec<Line>, TflError> {
        self.check_available()?;
        Ok(self.lines.clone())
    }

    async fn line_status(&self, line: &str) -> Result<Vec<Line>, TflError> {
        self.check_available()?;
        match self.lines.iter().find(|l| l.id == line) {
            Some(found) => Ok(vec![found.clone()]),
            None => Err(TflError::LineNotFound),
        }
    }

    async fn stops_near(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<StopPointsResponse, TflError> {
        self.check_available()?;
        Ok(StopPointsResponse {
            stop_points: self.stops.clone(),
        })
    }

    async fn arrivals(&self, stop_id: &str) -> Result<Vec<Prediction>, TflError> {
        self.check_available()?;
        Ok(self.arrivals.get(stop_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfl::LineStatus;

    fn line(id: &str, name: &str) -> Line {
        Line {
            id: id.to_string(),
            name: name.to_string(),
            line_statuses: vec![LineStatus {
                status_severity_description: "Good Service".to_string(),
                reason: None,
            }],
        }
    }

    #[tokio::test]
    async fn serves_canned_lines() {
        let mock = MockTflClient::new().with_lines(vec![line("jubilee", "Jubilee")]);

        let lines = mock.network_status().await.unwrap();
        assert_eq!(lines.len(), 1);

        let found = mock.line_status("jubilee").await.unwrap();
        assert_eq!(found[0].name, "Jubilee");
    }

    #[tokio::test]
    async fn unknown_line_is_not_found() {
        let mock = MockTflClient::new().with_lines(vec![line("jubilee", "Jubilee")]);

        let result = mock.line_status("hogwarts-express").await;
        assert!(matches!(result, Err(TflError::LineNotFound)));
    }

    #[tokio::test]
    async fn failing_mode_is_shared_between_clones() {
        let mock = MockTflClient::new().with_lines(vec![line("jubilee", "Jubilee")]);
        let clone = mock.clone();

        clone.set_failing(true);
        assert!(matches!(
            mock.network_status().await,
            Err(TflError::Api { status: 503, .. })
        ));

        clone.set_failing(false);
        assert!(mock.network_status().await.is_ok());
    }

    #[tokio::test]
    async fn arrivals_default_to_empty() {
        let mock = MockTflClient::new();
        let predictions = mock.arrivals("940GZZLUBNK").await.unwrap();
        assert!(predictions.is_empty());
    }
}
