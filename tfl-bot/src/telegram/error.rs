//! Telegram client error types.

/// Errors from the Telegram HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API rejected the request
    #[error("Telegram API error {status}: {description}")]
    Api { status: u16, description: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TelegramError::Api {
            status: 400,
            description: "Bad Request: chat not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Telegram API error 400: Bad Request: chat not found"
        );

        let err = TelegramError::Json {
            message: "expected value".into(),
        };
        assert!(err.to_string().contains("JSON parse error"));
    }
}
