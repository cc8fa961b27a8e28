//! Telegram Bot API integration
//!
//! A small HTTP client for the handful of Bot API methods the bot needs:
//! `getMe`, `getUpdates` (long polling), `sendMessage`, `sendPhoto` and
//! `setMyCommands`.
//!
//! # Example
//!
//! ```no_run
//! use integration_telegram::{TelegramClient, TelegramClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TelegramClient::new(TelegramClientConfig::new("123456:ABC"))?;
//!
//! let me = client.get_me().await?;
//! for update in client.get_updates(None, 30).await? {
//!     if let Some(message) = update.message {
//!         client.send_message(message.chat.id, "Hello!").await?;
//!     }
//! }
//! # let _ = me;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;
mod types;

pub use client::TelegramClient;
pub use error::TelegramError;
pub use types::{
    ApiResponse, BotCommandSpec, Chat, Message, TelegramClientConfig, Update, User,
};
