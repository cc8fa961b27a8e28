//! Bot API configuration and wire types
//!
//! Only the fields the bot reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::error::TelegramError;

/// Configuration for the Telegram client
#[derive(Clone)]
pub struct TelegramClientConfig {
    /// Bot token issued by @BotFather
    pub bot_token: String,
    /// Bot API base URL
    pub api_base_url: String,
    /// Request timeout in seconds for regular calls
    pub timeout_secs: u64,
}

impl TelegramClientConfig {
    /// Public Bot API endpoint
    pub const DEFAULT_API_BASE_URL: &'static str = "https://api.telegram.org";

    /// Default request timeout (30 seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a new config with the required bot token
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            ..Self::default()
        }
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for TelegramClientConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for TelegramClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClientConfig")
            .field("bot_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// Envelope wrapping every Bot API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    pub ok: bool,
    /// Payload on success
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    /// Human-readable error on failure
    #[serde(default)]
    pub description: Option<String>,
    /// Error code on failure (mirrors the HTTP status)
    #[serde(default)]
    pub error_code: Option<i32>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope into its payload
    ///
    /// `fallback_code` is used when a failed response carries no
    /// `error_code`.
    pub fn into_result(self, fallback_code: i32) -> Result<T, TelegramError> {
        if !self.ok {
            return Err(TelegramError::api(
                self.error_code.unwrap_or(fallback_code),
                self.description.unwrap_or_default(),
            ));
        }

        self.result
            .ok_or_else(|| TelegramError::InvalidResponse("ok response without result".into()))
    }
}

// ============================================================================
// Objects
// ============================================================================

/// A Telegram user or bot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Whether this user is a bot
    #[serde(default)]
    pub is_bot: bool,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Username without the leading `@`
    #[serde(default)]
    pub username: Option<String>,
}

/// A chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    /// Chat identifier (negative for groups)
    pub id: i64,
    /// "private", "group", "supergroup" or "channel"
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// An incoming message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Message identifier within the chat
    pub message_id: i64,
    /// Chat the message belongs to
    pub chat: Chat,
    /// Sender, absent for channel posts
    #[serde(default)]
    pub from: Option<User>,
    /// Unix timestamp
    #[serde(default)]
    pub date: i64,
    /// Text content, absent for media messages
    #[serde(default)]
    pub text: Option<String>,
}

/// An incoming update from `getUpdates`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    /// Monotonic update identifier
    pub update_id: i64,
    /// New incoming message, if this update is one
    #[serde(default)]
    pub message: Option<Message>,
}

impl Update {
    /// Chat id and text of a text message update
    #[must_use]
    pub fn text_message(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref()?;
        Some((message.chat.id, message.text.as_deref()?))
    }
}

/// A command shown in the client's command menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandSpec {
    /// Command name without the slash
    pub command: String,
    /// Description shown next to it
    pub description: String,
}

impl BotCommandSpec {
    /// Create a command entry
    #[must_use]
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetMyCommandsRequest<'a> {
    pub commands: &'a [BotCommandSpec],
}
