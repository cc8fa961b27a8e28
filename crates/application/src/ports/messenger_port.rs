//! Messenger port - Outgoing replies to a chat
//!
//! Abstracts the chat transport so the dispatcher can be tested without a
//! real messenger.

use async_trait::async_trait;
use domain::ChatId;
#[cfg(test)]
use mockall::automock;

use super::ChartImage;
use crate::error::ApplicationError;

/// What the bot answers to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text message
    Text(String),

    /// Photo attachment with an optional caption (empty = none)
    Photo {
        /// Rendered chart
        image: ChartImage,
        /// Caption shown under the photo
        caption: String,
    },
}

impl Reply {
    /// Create a text reply
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Text content, if this is a text reply
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Photo { .. } => None,
        }
    }

    /// Whether this reply carries an image
    #[must_use]
    pub const fn is_photo(&self) -> bool {
        matches!(self, Self::Photo { .. })
    }
}

/// Port for sending replies to a chat
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), ApplicationError>;

    /// Upload and send a photo
    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: &ChartImage,
        caption: &str,
    ) -> Result<(), ApplicationError>;
}
