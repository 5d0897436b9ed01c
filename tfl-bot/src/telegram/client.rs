//! Telegram Bot API HTTP client.

use serde::de::DeserializeOwned;

use super::error::TelegramError;
use super::types::{ApiResponse, Message, ReplyMarkup, SendMessage, Update};

/// Default base URL for the Bot API.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Extra headroom on the HTTP timeout over the long-poll timeout, so the
/// server side always wins the race.
const TIMEOUT_HEADROOM_SECS: u64 = 10;

/// Configuration for the Telegram client.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from @BotFather.
    pub token: String,
    /// Base URL for the API (defaults to production).
    pub base_url: String,
    /// Long-poll timeout passed to `getUpdates`, in seconds.
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    /// Create a new config with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the long-poll timeout.
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }
}

/// Telegram Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Create a new Telegram client with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.poll_timeout_secs + TIMEOUT_HEADROOM_SECS,
            ))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    /// Long-poll for new updates.
    ///
    /// `offset` should be one past the last update already processed;
    /// passing it acknowledges everything before it.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let mut query = vec![("timeout", self.poll_timeout_secs.to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let response = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&query)
            .send()
            .await?;

        self.unwrap_response(response).await
    }

    /// Send an HTML-formatted message, optionally with a reply keyboard.
    ///
    /// Web page previews are disabled; replies link to tfl.gov.uk a lot
    /// and the previews drown the actual content.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<Message, TelegramError> {
        let payload = SendMessage {
            chat_id,
            text: text.to_string(),
            parse_mode: "HTML",
            disable_web_page_preview: true,
            reply_markup,
        };

        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await?;

        self.unwrap_response(response).await
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Unwrap the Bot API envelope, turning `ok: false` into an error.
    async fn unwrap_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        let status = response.status();
        let body = response.text().await?;

        let parsed: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| TelegramError::Json {
                message: e.to_string(),
            })?;

        if !parsed.ok {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description: parsed.description.unwrap_or_default(),
            });
        }

        parsed.result.ok_or(TelegramError::Api {
            status: status.as_u16(),
            description: "ok response with no result".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TelegramConfig::new("123:abc")
            .with_base_url("http://localhost:8081")
            .with_poll_timeout(5);

        assert_eq!(config.token, "123:abc");
        assert_eq!(config.base_url, "http://localhost:8081");
        assert_eq!(config.poll_timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = TelegramConfig::new("123:abc");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = TelegramClient::new(TelegramConfig::new("123:abc"));
        assert!(client.is_ok());
    }

    #[test]
    fn method_url_embeds_token() {
        let client = TelegramClient::new(TelegramConfig::new("123:abc")).unwrap();
        assert_eq!(
            client.method_url("getUpdates"),
            "https://api.telegram.org/bot123:abc/getUpdates"
        );
    }
}
