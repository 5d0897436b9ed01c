//! Command parsing and dispatch.
//!
//! Maps incoming chat messages to handlers and produces the replies to
//! send. Holds the per-chat dialogue sessions; the transport layer feeds
//! this one message at a time per chat, so no locking is needed here.

use std::collections::HashMap;

use tracing::warn;

use crate::config::BotConfig;
use crate::dialogue::{DialogueSession, Selection, Stage, StationCandidate};
use crate::format::arrivals::ArrivalBoard;
use crate::format::status;
use crate::tfl::{TflError, TransitApi};

const PING_REPLY: &str = "Pong! 🏓";
const UNKNOWN_COMMAND_REPLY: &str =
    "🤷 Sorry, I'm not sure what command you want. Try /help to see what you can do.";
const LINE_NOT_RECOGNISED_REPLY: &str = "🤷 Sorry, I didn't recognise that line.";
const TRANSIENT_FAILURE_REPLY: &str =
    "😓 Sorry, I couldn't reach TfL just now. Please try again in a moment.";
const LOCATION_PROMPT: &str =
    "📍 Share your location and I'll find the nearest stations for you.";
const CHOOSE_STATION_PROMPT: &str = "🚉 Pick a station and I'll check what's arriving.";
const NO_STATIONS_REPLY: &str =
    "😢 I couldn't find any stations near you. I can only see Tube, Overground, DLR and TfL Rail stops.";
const NO_ARRIVALS_REPLY: &str =
    "💤 No arrivals reported for that station right now.";
const STATION_NOT_RECOGNISED_REPLY: &str =
    "🤔 That doesn't match any of the stations I offered, so I've stopped looking. Send /now to start again.";
const CANCELLED_REPLY: &str = "👍 Okay, cancelled.";
const CLEARED_KEYBOARD_REPLY: &str = "🧹 Keyboard cleared.";

/// A message from the user, already reduced to the shapes the bot handles.
#[derive(Debug, Clone)]
pub enum Incoming {
    Text(String),
    Location { latitude: f64, longitude: f64 },
}

/// Keyboard affordance to attach to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    None,
    /// One button asking the chat client to share the user's location.
    RequestLocation,
    /// One button per station candidate.
    Choices(Vec<String>),
    /// Remove any lingering custom keyboard.
    Remove,
}

/// An outgoing reply: HTML text plus an optional keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

/// A recognised bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Ping,
    /// `/status` for the network, `/status <line>` for one line.
    Status(Option<String>),
    Strikes,
    Now,
    Cancel,
    ClearKeyboard,
    /// Direct per-line command (`/jubilee`, `/wac`), already canonical.
    Line(String),
    Unknown,
}

impl Command {
    /// Parse a message as a command.
    ///
    /// Returns `None` for ordinary text (no leading `/`). A `@botname`
    /// suffix, as Telegram adds in group chats, is stripped. Anything
    /// command-shaped that matches nothing is `Unknown`.
    pub fn parse(text: &str, config: &BotConfig) -> Option<Self> {
        let rest = text.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let head = parts.next()?;
        let name = head.split('@').next().unwrap_or(head).to_lowercase();

        let command = match name.as_str() {
            "help" | "start" => Command::Help,
            "ping" => Command::Ping,
            "status" => Command::Status(parts.next().map(str::to_string)),
            "strikes" | "strike" => Command::Strikes,
            "now" => Command::Now,
            "cancel" => Command::Cancel,
            "clearkb" => Command::ClearKeyboard,
            other if config.is_line(other) && !other.contains('-') => {
                Command::Line(other.to_string())
            }
            other => match config.command_aliases().find(|(alias, _)| *alias == other) {
                Some((_, line)) => Command::Line(line.to_string()),
                None => Command::Unknown,
            },
        };
        Some(command)
    }
}

/// Routes messages to handlers and owns the per-chat dialogue sessions.
///
/// Generic over the TfL backend so handlers can be tested against
/// [`crate::tfl::MockTflClient`].
pub struct Router<A> {
    config: BotConfig,
    tfl: A,
    sessions: HashMap<i64, DialogueSession>,
}

impl<A: TransitApi> Router<A> {
    pub fn new(config: BotConfig, tfl: A) -> Self {
        Self {
            config,
            tfl,
            sessions: HashMap::new(),
        }
    }

    /// Stage of this chat's dialogue session, if one is running.
    pub fn session_stage(&self, chat_id: i64) -> Option<Stage> {
        self.sessions.get(&chat_id).map(DialogueSession::stage)
    }

    /// Handle one message from one chat, producing the replies to send.
    ///
    /// An empty result means the message is ignored (for example, plain
    /// text while no dialogue is running).
    pub async fn handle(&mut self, chat_id: i64, incoming: Incoming) -> Vec<Reply> {
        if let Incoming::Text(text) = &incoming {
            if let Some(command) = Command::parse(text, &self.config) {
                return self.handle_command(chat_id, command).await;
            }
        }
        self.handle_dialogue(chat_id, incoming).await
    }

    async fn handle_command(&mut self, chat_id: i64, command: Command) -> Vec<Reply> {
        match command {
            Command::Help => vec![Reply::text(help_text(&self.config))],
            Command::Ping => vec![Reply::text(PING_REPLY)],
            Command::Status(None) => self.network_status().await,
            Command::Status(Some(arg)) => {
                let line = self.config.resolve_line(&arg);
                self.line_status(&line).await
            }
            Command::Line(line) => self.line_status(&line).await,
            Command::Strikes => self.strikes().await,
            Command::Now => {
                self.sessions.insert(chat_id, DialogueSession::new());
                vec![Reply::with_keyboard(
                    LOCATION_PROMPT,
                    Keyboard::RequestLocation,
                )]
            }
            Command::Cancel => {
                if let Some(mut session) = self.sessions.remove(&chat_id) {
                    session.cancel();
                }
                vec![Reply::with_keyboard(CANCELLED_REPLY, Keyboard::Remove)]
            }
            Command::ClearKeyboard => {
                vec![Reply::with_keyboard(CLEARED_KEYBOARD_REPLY, Keyboard::Remove)]
            }
            Command::Unknown => vec![Reply::text(UNKNOWN_COMMAND_REPLY)],
        }
    }

    async fn network_status(&self) -> Vec<Reply> {
        match self.tfl.network_status().await {
            Ok(lines) => vec![Reply::text(status::network_status_message(
                &self.config,
                &lines,
            ))],
            Err(error) => vec![api_failure("network status", &error)],
        }
    }

    async fn line_status(&self, line: &str) -> Vec<Reply> {
        match self.tfl.line_status(line).await {
            Ok(lines) => match lines.first() {
                Some(line) => vec![Reply::text(status::line_status_message(
                    &self.config,
                    line,
                ))],
                None => vec![Reply::text(LINE_NOT_RECOGNISED_REPLY)],
            },
            Err(TflError::LineNotFound) => vec![Reply::text(LINE_NOT_RECOGNISED_REPLY)],
            Err(error) => vec![api_failure("line status", &error)],
        }
    }

    async fn strikes(&self) -> Vec<Reply> {
        match self.tfl.network_status().await {
            Ok(lines) => vec![Reply::text(status::strikes_message(&self.config, &lines))],
            Err(error) => vec![api_failure("strikes", &error)],
        }
    }

    /// Advance the chat's dialogue, if one is running.
    ///
    /// Input that doesn't fit the current stage (text while waiting for a
    /// location, a location while waiting for a station) is ignored.
    async fn handle_dialogue(&mut self, chat_id: i64, incoming: Incoming) -> Vec<Reply> {
        let Some(stage) = self.sessions.get(&chat_id).map(DialogueSession::stage) else {
            return Vec::new();
        };

        let replies = match (stage, incoming) {
            (
                Stage::AwaitingLocation,
                Incoming::Location {
                    latitude,
                    longitude,
                },
            ) => self.offer_stations(chat_id, latitude, longitude).await,
            (Stage::AwaitingStation, Incoming::Text(text)) => {
                self.station_chosen(chat_id, &text).await
            }
            _ => return Vec::new(),
        };

        if self
            .sessions
            .get(&chat_id)
            .is_some_and(DialogueSession::is_terminal)
        {
            self.sessions.remove(&chat_id);
        }
        replies
    }

    async fn offer_stations(&mut self, chat_id: i64, latitude: f64, longitude: f64) -> Vec<Reply> {
        // On a fetch failure the session stays at AwaitingLocation so the
        // user can simply share their location again.
        let response = match self.tfl.stops_near(latitude, longitude).await {
            Ok(response) => response,
            Err(error) => return vec![api_failure("stop search", &error)],
        };

        let candidates = response.stop_points.into_iter().map(|stop| StationCandidate {
            name: stop.common_name,
            id: stop.naptan_id,
        });

        let Some(session) = self.sessions.get_mut(&chat_id) else {
            return Vec::new();
        };
        session.offer(candidates);

        if session.stage() == Stage::Done {
            return vec![Reply::with_keyboard(NO_STATIONS_REPLY, Keyboard::Remove)];
        }
        let names: Vec<String> = session.candidate_names().map(str::to_string).collect();
        vec![Reply::with_keyboard(
            CHOOSE_STATION_PROMPT,
            Keyboard::Choices(names),
        )]
    }

    async fn station_chosen(&mut self, chat_id: i64, text: &str) -> Vec<Reply> {
        let selection = match self.sessions.get_mut(&chat_id) {
            Some(session) => session.select(text),
            None => return Vec::new(),
        };

        let stop_id = match selection {
            Selection::Matched(id) => id,
            Selection::NotRecognised => {
                return vec![Reply::with_keyboard(
                    STATION_NOT_RECOGNISED_REPLY,
                    Keyboard::Remove,
                )];
            }
        };

        match self.tfl.arrivals(&stop_id).await {
            Ok(predictions) => {
                let board = ArrivalBoard::from_predictions(&predictions);
                if board.is_empty() {
                    vec![Reply::with_keyboard(NO_ARRIVALS_REPLY, Keyboard::Remove)]
                } else {
                    vec![Reply::with_keyboard(board.render(), Keyboard::Remove)]
                }
            }
            Err(error) => {
                let mut reply = api_failure("arrivals", &error);
                reply.keyboard = Keyboard::Remove;
                vec![reply]
            }
        }
    }
}

/// Log an API failure and produce the generic transient-failure reply.
fn api_failure(context: &str, error: &TflError) -> Reply {
    warn!(context, error = %error, "TfL request failed");
    Reply::text(TRANSIENT_FAILURE_REPLY)
}

fn help_text(config: &BotConfig) -> String {
    format!(
        "🤖 <b>Hi, I'm {} 🚝🚍🚟</b>\n\n\
         I'm here to help you get around on TfL\n\n\
         <b>/status</b>\nCheck the status of the whole network.\n\n\
         <b>/status &lt;line&gt;</b>\nCheck the status of a specific line.\n\n\
         <b>/now</b>\nFind live arrivals near you.\n\n\
         <b>/strikes</b>\nCheck for strike action on the network.\n\n\
         ⚡️ Powered by <b><a href=\"https://tfl.gov.uk/info-for/open-data-users/\">TfL Open Data</a></b>",
        config.settings.name
    )
}
