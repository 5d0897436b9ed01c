//! TfL Unified API client.
//!
//! This module provides an HTTP client for the Transport for London
//! Unified API, which serves line status, stop point search and live
//! arrival predictions.
//!
//! Key characteristics of the API:
//! - Statuses per line are ordered worst-first; the first entry in
//!   `lineStatuses` is the one to display
//! - Arrival predictions give `timeToStation` in seconds
//! - An unknown line identifier produces a 404, not an empty list

mod api;
mod client;
mod error;
mod mock;
mod types;

pub use api::TransitApi;
pub use client::{TflClient, TflConfig};
pub use error::TflError;
pub use mock::MockTflClient;
pub use types::{Line, LineStatus, Prediction, StopPoint, StopPointsResponse};
