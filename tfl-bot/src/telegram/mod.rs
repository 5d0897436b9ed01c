//! Telegram Bot API client.
//!
//! A thin long-polling transport: `getUpdates` for inbound messages and
//! `sendMessage` for replies. Only the handful of types and methods the
//! bot needs are modelled.
//!
//! Key characteristics of the Bot API:
//! - Every response is wrapped in `{ "ok": bool, "result": ... }`; errors
//!   arrive as `ok: false` with a `description`, not bare HTTP errors
//! - `getUpdates` long-polls; acknowledging an update means passing
//!   `offset = update_id + 1` on the next call

mod client;
mod error;
mod types;

pub use client::{TelegramClient, TelegramConfig};
pub use error::TelegramError;
pub use types::{
    Chat, KeyboardButton, Location, Message, ReplyKeyboardMarkup, ReplyKeyboardRemove,
    ReplyMarkup, Update,
};
