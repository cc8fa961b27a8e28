//! Telegram messenger adapter
//!
//! Implements the `MessengerPort` trait using the Telegram integration crate.

use application::error::ApplicationError;
use application::ports::{ChartImage, MessengerPort};
use async_trait::async_trait;
use domain::{BotCommand, ChatId};
use integration_telegram::{
    BotCommandSpec, TelegramClient, TelegramClientConfig, TelegramError, User,
};
use tracing::{debug, info, instrument};

/// Adapter that implements `MessengerPort` using `TelegramClient`
#[derive(Debug, Clone)]
pub struct TelegramMessenger {
    /// The underlying Bot API client
    client: TelegramClient,
}

impl TelegramMessenger {
    /// Create a new Telegram messenger adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: TelegramClientConfig) -> Result<Self, ApplicationError> {
        let client = TelegramClient::new(config).map_err(map_telegram_error)?;
        Ok(Self { client })
    }

    /// Get a reference to the underlying client
    #[must_use]
    pub const fn client(&self) -> &TelegramClient {
        &self.client
    }

    /// Check the token and return the bot's identity
    pub async fn identify(&self) -> Result<User, ApplicationError> {
        let me = self.client.get_me().await.map_err(map_telegram_error)?;
        info!(
            bot_id = me.id,
            username = me.username.as_deref().unwrap_or_default(),
            "Connected to Telegram"
        );
        Ok(me)
    }

    /// Publish the command menu shown by Telegram clients
    #[instrument(skip(self))]
    pub async fn register_commands(&self) -> Result<(), ApplicationError> {
        let commands: Vec<BotCommandSpec> = BotCommand::menu_entries()
            .iter()
            .map(|(name, description)| BotCommandSpec::new(*name, *description))
            .collect();

        self.client
            .set_my_commands(&commands)
            .await
            .map_err(map_telegram_error)?;

        debug!(count = commands.len(), "Bot commands registered");
        Ok(())
    }
}

#[async_trait]
impl MessengerPort for TelegramMessenger {
    #[instrument(skip(self, text), fields(chat_id = %chat_id, text_len = text.len()))]
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), ApplicationError> {
        self.client
            .send_message(chat_id.as_i64(), text)
            .await
            .map_err(map_telegram_error)?;
        debug!("Text reply sent");
        Ok(())
    }

    #[instrument(skip(self, image, caption), fields(chat_id = %chat_id, request_id = %image.request_id()))]
    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: &ChartImage,
        caption: &str,
    ) -> Result<(), ApplicationError> {
        self.client
            .send_photo(
                chat_id.as_i64(),
                image.bytes().to_vec(),
                &image.file_name(),
                caption,
            )
            .await
            .map_err(map_telegram_error)?;
        debug!("Photo reply sent");
        Ok(())
    }
}

/// Map Telegram errors to application errors
fn map_telegram_error(err: TelegramError) -> ApplicationError {
    match err {
        TelegramError::Configuration(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}
