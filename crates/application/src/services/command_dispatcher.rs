//! Command dispatcher - routes chat commands to their handlers
//!
//! Parses incoming message text, produces a [`Reply`] and delivers it
//! through the [`MessengerPort`].

use std::sync::Arc;

use domain::{BotCommand, ChatId};
use tracing::{debug, info, instrument};

use super::command_texts::static_text;
use super::WeatherCommandService;
use crate::command_parser::CommandParser;
use crate::error::ApplicationError;
use crate::ports::{MessengerPort, Reply};

/// Routes commands and delivers replies
pub struct CommandDispatcher {
    parser: CommandParser,
    weather: WeatherCommandService,
    messenger: Arc<dyn MessengerPort>,
}

impl std::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("parser", &self.parser)
            .field("weather", &self.weather)
            .finish_non_exhaustive()
    }
}

impl CommandDispatcher {
    /// Create a dispatcher
    pub fn new(
        parser: CommandParser,
        weather: WeatherCommandService,
        messenger: Arc<dyn MessengerPort>,
    ) -> Self {
        Self {
            parser,
            weather,
            messenger,
        }
    }

    /// Produce the reply for a parsed command
    pub async fn dispatch(&self, command: &BotCommand) -> Reply {
        match command {
            BotCommand::Weather { args } => self.weather.handle_weather_command(args).await,
            other => Reply::text(static_text(other).unwrap_or_default()),
        }
    }

    /// Handle one incoming text message
    ///
    /// Returns `Ok(false)` when the text is not a command for this bot. An
    /// error means the reply could not be delivered; it concerns this
    /// message only.
    #[instrument(skip_all, fields(chat_id = %chat_id))]
    pub async fn handle_message(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<bool, ApplicationError> {
        let Some(command) = self.parser.parse(text) else {
            debug!("Ignoring non-command message");
            return Ok(false);
        };

        if command.is_static() {
            info!(command = command.name(), chat_id = %chat_id, "Static command requested");
        } else {
            debug!(command = command.name(), "Weather command requested");
        }

        match self.dispatch(&command).await {
            Reply::Text(text) => self.messenger.send_text(chat_id, &text).await?,
            Reply::Photo { image, caption } => {
                self.messenger.send_photo(chat_id, &image, &caption).await?;
            },
        }

        Ok(true)
    }
}
