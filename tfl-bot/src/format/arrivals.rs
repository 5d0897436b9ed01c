//! Arrival board aggregation and rendering.
//!
//! Turns a flat list of arrival predictions into a per-line, per-destination
//! board with ascending times, then renders it as an HTML message.

use crate::tfl::Prediction;

/// Maximum arrival times shown per destination.
const MAX_DISPLAYED_TIMES: usize = 3;

/// Arrivals for one destination on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationBoard {
    /// Normalised destination label.
    pub destination: String,

    /// Platform label. When predictions disagree the last one seen wins;
    /// within one query the platform is effectively constant per destination.
    pub platform: String,

    /// Seconds to arrival, ascending.
    pub times: Vec<i64>,
}

/// Arrivals for one line, grouped by destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBoard {
    pub line: String,
    pub destinations: Vec<DestinationBoard>,
}

/// A full arrival board for one station.
///
/// Lines and destinations keep the order they first appear in the
/// prediction list; times within each destination are sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrivalBoard {
    pub lines: Vec<LineBoard>,
}

impl ArrivalBoard {
    /// Build a board from raw predictions.
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let mut lines: Vec<LineBoard> = Vec::new();

        for prediction in predictions {
            let destination = match prediction.destination_name.as_deref() {
                Some(name) => normalise_destination(name),
                None => fallback_destination(&prediction.platform_name),
            };

            let line_idx = match lines.iter().position(|l| l.line == prediction.line_name) {
                Some(idx) => idx,
                None => {
                    lines.push(LineBoard {
                        line: prediction.line_name.clone(),
                        destinations: Vec::new(),
                    });
                    lines.len() - 1
                }
            };
            let destinations = &mut lines[line_idx].destinations;

            match destinations.iter_mut().find(|d| d.destination == destination) {
                Some(group) => {
                    group.platform = prediction.platform_name.clone();
                    group.times.push(prediction.time_to_station);
                }
                None => destinations.push(DestinationBoard {
                    destination,
                    platform: prediction.platform_name.clone(),
                    times: vec![prediction.time_to_station],
                }),
            }
        }

        for line in &mut lines {
            for group in &mut line.destinations {
                group.times.sort_unstable();
            }
        }

        Self { lines }
    }

    /// Whether the board has no arrivals at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the board as an HTML message.
    ///
    /// Each destination shows at most [`MAX_DISPLAYED_TIMES`] times, the
    /// soonest in bold.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&format!("🚇 <b>{}</b>", line.line));
            for group in &line.destinations {
                let times: Vec<String> = group
                    .times
                    .iter()
                    .take(MAX_DISPLAYED_TIMES)
                    .enumerate()
                    .map(|(i, &secs)| {
                        if i == 0 {
                            format!("<b>{}</b>", format_eta(secs))
                        } else {
                            format_eta(secs)
                        }
                    })
                    .collect();
                out.push_str(&format!(
                    "\n➡️ {}: {}",
                    group.destination,
                    times.join(", ")
                ));
            }
        }
        out
    }
}

/// Render a time-to-arrival: "Due" under a minute, whole minutes otherwise.
pub fn format_eta(seconds: i64) -> String {
    if seconds < 60 {
        "Due".to_string()
    } else {
        format!("{} mins", seconds / 60)
    }
}

/// Clean up a destination name for display.
///
/// Strips the stop-type suffixes TfL appends to station names, and any
/// trailing line-qualifier parenthetical ("Edgware Road (Circle Line)").
pub fn normalise_destination(name: &str) -> String {
    let trimmed = name.trim();
    let mut cleaned = if let Some(base) = trimmed.strip_suffix(" Underground Station") {
        base.to_string()
    } else if let Some(base) = trimmed.strip_suffix(" DLR Station") {
        format!("{base} DLR")
    } else if let Some(base) = trimmed.strip_suffix(" Rail Station") {
        base.to_string()
    } else {
        trimmed.to_string()
    };

    if let Some(idx) = cleaned.find(" (") {
        cleaned.truncate(idx);
    }
    cleaned
}

/// Label for a prediction with no destination (terminating or unusual
/// service), derived from the platform so such trains stay distinguishable.
fn fallback_destination(platform: &str) -> String {
    if platform.is_empty() {
        "Check front of train".to_string()
    } else {
        format!("Check front of train ({platform})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn prediction(
        line: &str,
        destination: Option<&str>,
        platform: &str,
        time_to_station: i64,
    ) -> Prediction {
        Prediction {
            line_name: line.to_string(),
            destination_name: destination.map(str::to_string),
            platform_name: platform.to_string(),
            time_to_station,
        }
    }

    #[test]
    fn eta_renders_due_under_a_minute() {
        assert_eq!(format_eta(0), "Due");
        assert_eq!(format_eta(59), "Due");
        assert_eq!(format_eta(60), "1 mins");
        assert_eq!(format_eta(90), "1 mins");
        assert_eq!(format_eta(125), "2 mins");
    }

    #[test]
    fn normalise_strips_station_suffixes() {
        assert_eq!(
            normalise_destination("Stanmore Underground Station"),
            "Stanmore"
        );
        assert_eq!(normalise_destination("Lewisham DLR Station"), "Lewisham DLR");
        assert_eq!(normalise_destination("Shenfield Rail Station"), "Shenfield");
        assert_eq!(normalise_destination("Cockfosters"), "Cockfosters");
    }

    #[test]
    fn normalise_strips_line_qualifier() {
        assert_eq!(
            normalise_destination("Edgware Road (Circle Line) Underground Station"),
            "Edgware Road"
        );
        assert_eq!(
            normalise_destination("Hammersmith (H&C Line)"),
            "Hammersmith"
        );
    }

    #[test]
    fn missing_destination_uses_platform_label() {
        let board = ArrivalBoard::from_predictions(&[prediction(
            "District",
            None,
            "Platform 3",
            45,
        )]);

        assert_eq!(
            board.lines[0].destinations[0].destination,
            "Check front of train (Platform 3)"
        );
    }

    #[test]
    fn groups_by_line_then_destination_with_sorted_times() {
        let predictions = vec![
            prediction("Jubilee", Some("Stanmore Underground Station"), "P1", 240),
            prediction("Jubilee", Some("Stratford Underground Station"), "P2", 60),
            prediction("Jubilee", Some("Stanmore Underground Station"), "P1", 30),
            prediction("Central", Some("Epping Underground Station"), "P4", 120),
        ];

        let board = ArrivalBoard::from_predictions(&predictions);

        assert_eq!(board.lines.len(), 2);
        assert_eq!(board.lines[0].line, "Jubilee");
        let stanmore = &board.lines[0].destinations[0];
        assert_eq!(stanmore.destination, "Stanmore");
        assert_eq!(stanmore.times, vec![30, 240]);
    }

    #[test]
    fn platform_last_write_wins() {
        let predictions = vec![
            prediction("Victoria", Some("Brixton Underground Station"), "P1", 60),
            prediction("Victoria", Some("Brixton Underground Station"), "P2", 120),
        ];

        let board = ArrivalBoard::from_predictions(&predictions);

        assert_eq!(board.lines[0].destinations[0].platform, "P2");
    }

    #[test]
    fn empty_predictions_give_empty_board() {
        let board = ArrivalBoard::from_predictions(&[]);
        assert!(board.is_empty());
        assert_eq!(board.render(), "");
    }

    #[test]
    fn render_cockfosters_scenario() {
        let predictions = vec![
            prediction("Piccadilly", Some("Cockfosters"), "P2", 30),
            prediction("Piccadilly", Some("Cockfosters"), "P2", 125),
            prediction("Piccadilly", Some("Cockfosters"), "P2", 245),
            prediction("Piccadilly", Some("Cockfosters"), "P2", 400),
            prediction("Northern", Some("Morden Underground Station"), "P1", 90),
        ];

        let rendered = ArrivalBoard::from_predictions(&predictions).render();

        assert!(rendered.contains("➡️ Cockfosters: <b>Due</b>, 2 mins, 4 mins"));
        assert!(rendered.contains("➡️ Morden: <b>1 mins</b>"));
        // fourth Cockfosters time is truncated
        assert!(!rendered.contains("6 mins"));
    }

    proptest! {
        #[test]
        fn times_are_ascending_and_capped(
            times in proptest::collection::vec(0i64..7200, 0..20)
        ) {
            let predictions: Vec<Prediction> = times
                .iter()
                .map(|&t| prediction("Jubilee", Some("Stanmore"), "P1", t))
                .collect();

            let board = ArrivalBoard::from_predictions(&predictions);

            for line in &board.lines {
                for group in &line.destinations {
                    prop_assert!(group.times.windows(2).all(|w| w[0] <= w[1]));
                }
            }

            let rendered = board.render();
            for row in rendered.lines().filter(|l| l.starts_with("➡️")) {
                prop_assert!(row.matches("mins").count() + row.matches("Due").count()
                    <= super::MAX_DISPLAYED_TIMES);
            }
        }

        #[test]
        fn eta_matches_floor_division(secs in 0i64..86_400) {
            let rendered = format_eta(secs);
            if secs < 60 {
                prop_assert_eq!(rendered, "Due");
            } else {
                prop_assert_eq!(rendered, format!("{} mins", secs / 60));
            }
        }
    }
}
