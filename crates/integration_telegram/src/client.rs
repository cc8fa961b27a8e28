//! Telegram Bot API client
//!
//! Calls `{api_base_url}/bot{token}/{method}`. JSON bodies for everything
//! except `sendPhoto`, which uploads the image as multipart form data.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::TelegramError;
use crate::types::{
    ApiResponse, BotCommandSpec, GetUpdatesRequest, Message, SendMessageRequest,
    SetMyCommandsRequest, TelegramClientConfig, Update, User,
};

/// Extra time granted to a long-poll request beyond its server-side timeout
const LONG_POLL_GRACE: Duration = Duration::from_secs(10);

/// Client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    config: TelegramClientConfig,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be
    /// built.
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramError> {
        if config.bot_token.trim().is_empty() {
            return Err(TelegramError::config("bot_token is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TelegramError::config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Full URL of a Bot API method
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    /// Identity of the bot owning the token
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Long-poll for new updates
    ///
    /// `offset` must be one greater than the last processed `update_id` so
    /// that Telegram drops the confirmed updates.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message"],
        };
        let request_timeout = Duration::from_secs(timeout_secs) + LONG_POLL_GRACE;
        self.call("getUpdates", &request, Some(request_timeout)).await
    }

    /// Send a plain text message
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        let request = SendMessageRequest { chat_id, text };
        self.call("sendMessage", &request, None).await
    }

    /// Upload a PNG and send it as a photo
    ///
    /// An empty caption is omitted.
    #[instrument(skip(self, png, caption), fields(bytes = png.len()))]
    pub async fn send_photo(
        &self,
        chat_id: i64,
        png: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<Message, TelegramError> {
        let photo = Part::bytes(png)
            .file_name(file_name.to_string())
            .mime_str("image/png")
            .map_err(TelegramError::request)?;

        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", photo);
        if !caption.is_empty() {
            form = form.text("caption", caption.to_string());
        }

        debug!(method = "sendPhoto", "Calling Bot API");
        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(TelegramError::request)?;

        Self::decode(response).await
    }

    /// Replace the bot's command menu
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    pub async fn set_my_commands(&self, commands: &[BotCommandSpec]) -> Result<(), TelegramError> {
        let request = SetMyCommandsRequest { commands };
        let _: bool = self.call("setMyCommands", &request, None).await?;
        Ok(())
    }

    /// POST a JSON request and decode the envelope
    async fn call<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> Result<R, TelegramError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(method, "Calling Bot API");

        let mut request = self.client.post(self.method_url(method)).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(TelegramError::request)?;
        Self::decode(response).await
    }

    /// Decode a Bot API response, successful or not
    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, TelegramError> {
        let status = response.status();
        let body = response.text().await.map_err(TelegramError::request)?;

        match serde_json::from_str::<ApiResponse<R>>(&body) {
            Ok(envelope) => envelope.into_result(i32::from(status.as_u16())),
            Err(_) if !status.is_success() => Err(TelegramError::api(
                i32::from(status.as_u16()),
                status.canonical_reason().unwrap_or("unknown status"),
            )),
            Err(e) => Err(TelegramError::InvalidResponse(e.to_string())),
        }
    }
}
