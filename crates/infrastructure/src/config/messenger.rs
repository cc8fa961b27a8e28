//! Messenger configuration: Telegram Bot API.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Telegram integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramAppConfig {
    /// Bot token from @BotFather (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub bot_token: Option<SecretString>,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Long-poll timeout for `getUpdates` in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Back-off after a failed poll in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Timeout for regular Bot API calls in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for TelegramAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramAppConfig")
            .field(
                "bot_token",
                &if self.bot_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("api_base_url", &self.api_base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_poll_timeout() -> u64 {
    30
}

const fn default_retry_delay() -> u64 {
    5
}

const fn default_request_timeout() -> u64 {
    30
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
            retry_delay_secs: default_retry_delay(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl TelegramAppConfig {
    /// Get the bot token as a string reference (for API calls)
    ///
    /// Empty tokens count as missing.
    #[must_use]
    pub fn bot_token_str(&self) -> Option<&str> {
        self.bot_token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|token| !token.trim().is_empty())
    }

    /// Build the integration client configuration
    #[must_use]
    pub fn to_client_config(&self) -> Option<integration_telegram::TelegramClientConfig> {
        let token = self.bot_token_str()?;
        Some(
            integration_telegram::TelegramClientConfig::new(token)
                .with_api_base_url(&self.api_base_url)
                .with_timeout_secs(self.request_timeout_secs),
        )
    }
}
