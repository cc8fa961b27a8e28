//! Chat identifier of the messenger conversation a command came from

use serde::{Deserialize, Serialize};
use std::fmt;

/// Telegram chat id (negative for groups and channels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Wrap a raw chat id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id as used by the Bot API
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Group chats and channels have negative ids
    #[must_use]
    pub const fn is_group(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
