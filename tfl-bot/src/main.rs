use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tfl_bot::config::BotConfig;
use tfl_bot::router::{Incoming, Keyboard, Router};
use tfl_bot::telegram::{ReplyMarkup, TelegramClient, TelegramConfig};
use tfl_bot::tfl::{TflClient, TflConfig};

/// How long to back off after a failed getUpdates call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get the bot token from the environment
    let token = match std::env::var("TFLG_TELEGRAM_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            error!("TFLG_TELEGRAM_TOKEN not set; cannot talk to Telegram");
            std::process::exit(1);
        }
    };

    // Load static configuration once; it is read-only from here on
    let config_path =
        std::env::var("TFLG_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = match BotConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_path, error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let mut tfl_config = TflConfig::new();
    if let Ok(key) = std::env::var("TFL_APP_KEY") {
        tfl_config = tfl_config.with_app_key(key);
    }
    let tfl = TflClient::new(tfl_config).expect("failed to create TfL client");

    let telegram =
        TelegramClient::new(TelegramConfig::new(token)).expect("failed to create Telegram client");

    let mut router = Router::new(config, tfl);

    info!("✅ Started TfLegram");

    let mut offset: Option<i64> = None;
    loop {
        let updates = match telegram.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let chat_id = message.chat.id;

            let incoming = if let Some(location) = message.location {
                Incoming::Location {
                    latitude: location.latitude,
                    longitude: location.longitude,
                }
            } else if let Some(text) = message.text {
                Incoming::Text(text)
            } else {
                // Stickers, photos and the like are ignored
                continue;
            };

            for reply in router.handle(chat_id, incoming).await {
                let markup = reply_markup(&reply.keyboard);
                if let Err(e) = telegram.send_message(chat_id, &reply.text, markup).await {
                    warn!(chat_id, error = %e, "failed to send reply");
                }
            }
        }
    }
}

/// Translate the router's keyboard request into Bot API markup.
fn reply_markup(keyboard: &Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::None => None,
        Keyboard::RequestLocation => Some(ReplyMarkup::location_request("📍 Share my location")),
        Keyboard::Choices(names) => Some(ReplyMarkup::choices(names)),
        Keyboard::Remove => Some(ReplyMarkup::remove()),
    }
}
