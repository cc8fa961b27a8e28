//! Error types for the Telegram integration

use thiserror::Error;

/// Errors that can occur during Bot API calls
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The Bot API answered with `ok: false`
    #[error("Bot API error (code {code}): {description}")]
    Api {
        /// `error_code` from the envelope, or the HTTP status
        code: i32,
        /// `description` from the envelope
        description: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TelegramError {
    /// Build from a reqwest error without leaking the token-bearing URL
    #[must_use]
    pub fn request(err: reqwest::Error) -> Self {
        Self::Request(err.without_url().to_string())
    }

    /// Create an API error
    #[must_use]
    pub fn api(code: i32, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            description: description.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if retrying the same call may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Api { code, .. } => *code == 429 || *code >= 500,
            Self::InvalidResponse(_) | Self::Configuration(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = TelegramError::api(400, "Bad Request: chat not found");
        assert_eq!(
            err.to_string(),
            "Bot API error (code 400): Bad Request: chat not found"
        );
    }

    #[test]
    fn config_error_display() {
        let err = TelegramError::config("bot_token is required");
        assert_eq!(err.to_string(), "Configuration error: bot_token is required");
    }

    #[test]
    fn request_is_retryable() {
        assert!(TelegramError::Request("timed out".into()).is_retryable());
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        assert!(TelegramError::api(429, "Too Many Requests").is_retryable());
        assert!(TelegramError::api(502, "Bad Gateway").is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!TelegramError::api(400, "Bad Request").is_retryable());
        assert!(!TelegramError::api(401, "Unauthorized").is_retryable());
        assert!(!TelegramError::config("x").is_retryable());
    }
}
