//! Bot commands - Strongly typed representations of chat commands

use serde::{Deserialize, Serialize};

/// All commands the bot understands
///
/// Each variant corresponds to one `/command` in the chat. Only `/weather`
/// takes arguments; they are the whitespace-separated words after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BotCommand {
    /// Introduce the bot
    Start,

    /// Show the help text
    Help,

    /// List all available commands
    Menu,

    /// Look up the weather for a location
    Weather {
        /// Location words; empty means "use the default location"
        args: Vec<String>,
    },
}

impl BotCommand {
    /// Commands registered with the messenger, in menu order
    pub const MENU_ENTRIES: [(&'static str, &'static str); 4] = [
        ("start", "Start the bot and get an introduction"),
        (
            "weather",
            "Get the weather for any city and see a graphical representation",
        ),
        ("help", "Display help information"),
        ("menu", "Display all available commands"),
    ];

    /// `(command, description)` pairs for the messenger's command menu
    #[must_use]
    pub const fn menu_entries() -> &'static [(&'static str, &'static str)] {
        &Self::MENU_ENTRIES
    }

    /// Build a command from its name (without the leading slash)
    ///
    /// Names are matched case-insensitively. Arguments are ignored for
    /// commands that take none.
    #[must_use]
    pub fn from_name(name: &str, args: Vec<String>) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "menu" => Some(Self::Menu),
            "weather" => Some(Self::Weather { args }),
            _ => None,
        }
    }

    /// Command name without the leading slash
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Menu => "menu",
            Self::Weather { .. } => "weather",
        }
    }

    /// Whether the reply is a fixed text independent of any input
    #[must_use]
    pub const fn is_static(&self) -> bool {
        !matches!(self, Self::Weather { .. })
    }
}
