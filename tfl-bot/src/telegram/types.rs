//! Telegram Bot API DTOs.
//!
//! Only the fields the bot reads or writes are modelled; the Bot API
//! tolerates unknown fields in both directions. Field names are already
//! snake_case on the wire, so no renaming is needed.

use serde::{Deserialize, Serialize};

/// Wrapper around every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One inbound update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    /// Absent for update kinds the bot doesn't handle (edits, callbacks).
    pub message: Option<Message>,
}

/// An inbound chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
    pub location: Option<Location>,
}

/// The conversation a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A shared location.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outgoing `sendMessage` payload.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    pub parse_mode: &'static str,
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Reply keyboard attachment for an outgoing message.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
}

impl ReplyMarkup {
    /// A single button asking the client to share the user's location.
    pub fn location_request(label: impl Into<String>) -> Self {
        ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
            keyboard: vec![vec![KeyboardButton {
                text: label.into(),
                request_location: Some(true),
            }]],
            resize_keyboard: true,
            one_time_keyboard: true,
        })
    }

    /// One button per choice, stacked in rows.
    pub fn choices(options: &[String]) -> Self {
        ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
            keyboard: options
                .iter()
                .map(|option| {
                    vec![KeyboardButton {
                        text: option.clone(),
                        request_location: None,
                    }]
                })
                .collect(),
            resize_keyboard: true,
            one_time_keyboard: true,
        })
    }

    /// Remove any custom keyboard from the chat.
    pub fn remove() -> Self {
        ReplyMarkup::Remove(ReplyKeyboardRemove {
            remove_keyboard: true,
        })
    }
}

/// A custom reply keyboard.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

/// One keyboard button.
#[derive(Debug, Clone, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
}

/// Instruction to remove the custom keyboard.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
}
