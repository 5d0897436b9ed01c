//! TfL API response DTOs.
//!
//! These types map directly to the Unified API JSON responses. They use
//! `Option` where the API omits fields rather than sending null values.

use serde::Deserialize;

/// A transit line with its current statuses, from `/Line/.../Status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Canonical line identifier (e.g. "jubilee").
    pub id: String,

    /// Human-readable line name (e.g. "Jubilee").
    pub name: String,

    /// Current statuses, worst first. Usually a single entry.
    #[serde(default)]
    pub line_statuses: Vec<LineStatus>,
}

/// One status entry for a line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatus {
    /// Severity description (e.g. "Good Service", "Severe Delays").
    pub status_severity_description: String,

    /// Disruption explanation. Absent when service is normal.
    pub reason: Option<String>,
}

/// Response wrapper from the `/StopPoint` radius search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointsResponse {
    #[serde(default)]
    pub stop_points: Vec<StopPoint>,
}

/// A stop point (station) from the radius search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    /// NaPTAN identifier, used for arrival queries.
    pub naptan_id: String,

    /// Display name (e.g. "Canary Wharf Underground Station").
    pub common_name: String,

    /// Distance from the query point, in metres.
    pub distance: Option<f64>,
}

/// An arrival prediction from `/StopPoint/{id}/Arrivals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Line the vehicle is running on.
    pub line_name: String,

    /// Destination display name. Absent for terminating or unusual
    /// services; the platform is the only hint in that case.
    pub destination_name: Option<String>,

    /// Platform label (e.g. "Eastbound - Platform 2").
    #[serde(default)]
    pub platform_name: String,

    /// Seconds until the vehicle reaches the station.
    pub time_to_station: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_line_status() {
        let json = r#"[
            {
                "id": "jubilee",
                "name": "Jubilee",
                "lineStatuses": [
                    {
                        "statusSeverityDescription": "Minor Delays",
                        "reason": "Jubilee Line: Minor delays due to an earlier signal failure."
                    },
                    {
                        "statusSeverityDescription": "Good Service"
                    }
                ]
            }
        ]"#;

        let lines: Vec<Line> = serde_json::from_str(json).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "jubilee");
        assert_eq!(lines[0].name, "Jubilee");
        assert_eq!(
            lines[0].line_statuses[0].status_severity_description,
            "Minor Delays"
        );
        assert!(lines[0].line_statuses[0].reason.is_some());
        assert!(lines[0].line_statuses[1].reason.is_none());
    }

    #[test]
    fn deserialize_stop_points() {
        let json = r#"{
            "stopPoints": [
                {
                    "naptanId": "940GZZLUCYF",
                    "commonName": "Canary Wharf Underground Station",
                    "distance": 110.5
                },
                {
                    "naptanId": "940GZZDLCAN",
                    "commonName": "Canary Wharf DLR Station"
                }
            ],
            "total": 2
        }"#;

        let response: StopPointsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.stop_points.len(), 2);
        assert_eq!(response.stop_points[0].naptan_id, "940GZZLUCYF");
        assert!(response.stop_points[1].distance.is_none());
    }

    #[test]
    fn deserialize_stop_points_without_results_field() {
        let response: StopPointsResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(response.stop_points.is_empty());
    }

    #[test]
    fn deserialize_prediction() {
        let json = r#"{
            "lineName": "Jubilee",
            "destinationName": "Stanmore Underground Station",
            "platformName": "Westbound - Platform 1",
            "timeToStation": 125
        }"#;

        let prediction: Prediction = serde_json::from_str(json).unwrap();

        assert_eq!(prediction.line_name, "Jubilee");
        assert_eq!(
            prediction.destination_name.as_deref(),
            Some("Stanmore Underground Station")
        );
        assert_eq!(prediction.time_to_station, 125);
    }

    #[test]
    fn deserialize_prediction_without_destination() {
        let json = r#"{
            "lineName": "District",
            "platformName": "Platform 3",
            "timeToStation": 30
        }"#;

        let prediction: Prediction = serde_json::from_str(json).unwrap();

        assert!(prediction.destination_name.is_none());
        assert_eq!(prediction.platform_name, "Platform 3");
    }
}
