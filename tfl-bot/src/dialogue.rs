//! The "arrivals near me" conversation.
//!
//! A three-stage dialogue: ask for a location, offer up to four nearby
//! stations, then show the arrival board for the chosen one. A session is
//! owned by a single chat and discarded once it reaches a terminal stage.

/// Maximum station candidates offered to the user.
pub const MAX_CANDIDATES: usize = 4;

/// Dialogue stages. `Done` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for the user to share a location.
    AwaitingLocation,
    /// Waiting for the user to pick one of the offered stations.
    AwaitingStation,
    /// Finished normally (board shown, or a dead end reported).
    Done,
    /// Explicitly cancelled by the user.
    Cancelled,
}

/// A station the user can choose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationCandidate {
    /// Display name, used as the exact-match selection key.
    pub name: String,
    /// NaPTAN identifier for the arrivals query.
    pub id: String,
}

/// Outcome of a station selection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The reply matched a candidate; here is its identifier.
    Matched(String),
    /// The reply matched nothing. The dialogue ends; no re-prompt.
    NotRecognised,
}

/// Per-chat dialogue state.
#[derive(Debug)]
pub struct DialogueSession {
    stage: Stage,
    candidates: Vec<StationCandidate>,
}

impl DialogueSession {
    /// Start a new dialogue, waiting for a location.
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingLocation,
            candidates: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the session has finished and should be discarded.
    pub fn is_terminal(&self) -> bool {
        matches!(self.stage, Stage::Done | Stage::Cancelled)
    }

    /// Store nearby stations and advance.
    ///
    /// Candidates are deduplicated by display name (last write wins) and
    /// capped at [`MAX_CANDIDATES`]. With no candidates there is nothing to
    /// choose, so the session goes straight to `Done`.
    pub fn offer(&mut self, stations: impl IntoIterator<Item = StationCandidate>) {
        self.candidates = dedup_candidates(stations);
        self.stage = if self.candidates.is_empty() {
            Stage::Done
        } else {
            Stage::AwaitingStation
        };
    }

    /// Candidate display names, in offer order.
    pub fn candidate_names(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.name.as_str())
    }

    /// Resolve the user's reply against the stored candidates.
    ///
    /// The reply must match a candidate name exactly. Either way the
    /// session is finished afterwards; a mismatch gets no second chance.
    pub fn select(&mut self, reply: &str) -> Selection {
        self.stage = Stage::Done;
        match self.candidates.iter().find(|c| c.name == reply) {
            Some(candidate) => Selection::Matched(candidate.id.clone()),
            None => Selection::NotRecognised,
        }
    }

    /// Cancel the dialogue from any stage.
    pub fn cancel(&mut self) {
        self.stage = Stage::Cancelled;
    }
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicate candidates by display name, capped at [`MAX_CANDIDATES`].
///
/// A repeated name overwrites the stored identifier; once the cap is
/// reached, stations with new names are dropped.
fn dedup_candidates(
    stations: impl IntoIterator<Item = StationCandidate>,
) -> Vec<StationCandidate> {
    let mut out: Vec<StationCandidate> = Vec::new();
    for station in stations {
        if let Some(existing) = out.iter_mut().find(|c| c.name == station.name) {
            existing.id = station.id;
        } else if out.len() < MAX_CANDIDATES {
            out.push(station);
        }
    }
    out
}
