//! Command parser - turns chat message text into a [`BotCommand`]
//!
//! Mirrors how Telegram clients address bots: the message must start with
//! `/command`, optionally suffixed with `@botusername`, followed by
//! whitespace-separated arguments.

use domain::BotCommand;
use tracing::trace;

/// Parser for slash commands
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    bot_username: Option<String>,
}

impl CommandParser {
    /// Create a parser that accepts `/command@anybot`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept `@`-addressed commands meant for this bot
    ///
    /// Commands without an `@` suffix are always accepted.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        let username = username.trim_start_matches('@');
        self.bot_username = (!username.is_empty()).then(|| username.to_string());
        self
    }

    /// Bot username this parser filters on, if any
    #[must_use]
    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.as_deref()
    }

    /// Parse message text into a command
    ///
    /// Returns `None` for plain text, unknown commands, and commands
    /// addressed to another bot.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<BotCommand> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;

        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };

        if let (Some(target), Some(own)) = (target, self.bot_username.as_deref()) {
            if !target.eq_ignore_ascii_case(own) {
                trace!(target = %target, "Ignoring command addressed to another bot");
                return None;
            }
        }

        let args = tokens.map(ToString::to_string).collect();
        BotCommand::from_name(name, args)
    }
}
