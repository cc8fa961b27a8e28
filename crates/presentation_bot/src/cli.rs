//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Telegram bot replying to `/weather` with a chart of current conditions
#[derive(Debug, Parser)]
#[command(name = "weatherbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "WEATHERBOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Connect to Telegram and answer commands until stopped
    Run,

    /// Look up the weather once and write the chart to a file
    Weather {
        /// City name; several words are joined with spaces
        location: Vec<String>,

        /// Where to write the PNG chart
        #[arg(short, long, default_value = "weather.png")]
        output: PathBuf,
    },
}

impl Cli {
    /// Subcommand to execute, `run` when none is given
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

/// Filter directive for the `-v` count, `None` to keep the configured one
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("weatherbot=debug,presentation_bot=debug,application=debug,infrastructure=debug,info"),
        _ => Some("trace"),
    }
}
