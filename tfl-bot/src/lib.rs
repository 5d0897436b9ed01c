//! Telegram bot for Transport for London service status and arrivals.
//!
//! Answers questions like "how is the Jubilee line doing?" and
//! "what's arriving at the station nearest me?" by relaying the
//! TfL Unified API into chat replies.

pub mod config;
pub mod dialogue;
pub mod format;
pub mod router;
pub mod telegram;
pub mod tfl;
