//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `messenger`: Telegram Bot API
//! - `integrations`: Weather provider, chart output
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `WEATHERBOT_*` environment variables (`__` separates sections, e.g.
//! `WEATHERBOT_WEATHER__API_KEY`). The plain variables `BOT_TOKEN`,
//! `WEATHER_API_KEY` and `LOCATION` only fill fields left empty.

mod integrations;
mod messenger;

use std::fmt;
use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use integrations::{ChartAppConfig, WeatherAppConfig};
pub use messenger::TelegramAppConfig;

use crate::telemetry::LoggingConfig;

/// Environment variable prefix for structured overrides
pub const ENV_PREFIX: &str = "WEATHERBOT";

/// Plain variable holding the bot token
pub const LEGACY_BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Plain variable holding the weather API key
pub const LEGACY_WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Plain variable holding the default location
pub const LEGACY_LOCATION_VAR: &str = "LOCATION";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Telegram Bot API settings
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Chart rendering settings
    #[serde(default)]
    pub chart: ChartAppConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Non-fatal configuration problems reported at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    /// No bot token; the bot cannot connect to Telegram
    #[error("telegram.bot_token is not set (or BOT_TOKEN)")]
    MissingBotToken,

    /// No API key; every weather lookup will fail
    #[error("weather.api_key is not set (or WEATHER_API_KEY)")]
    MissingWeatherApiKey,

    /// `/weather` without arguments will query an empty location
    #[error("weather.default_location is empty (or LOCATION); /weather without a city will fail")]
    EmptyDefaultLocation,

    /// Chart dimensions are unusable
    #[error("chart size {width}x{height} is invalid; both sides must be between 100 and 4096 px")]
    InvalidChartSize {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },

    /// Long-poll timeout above what Telegram allows
    #[error("telegram.poll_timeout_secs = {0} exceeds the Bot API maximum of 50")]
    PollTimeoutTooLong(u64),
}

impl ConfigWarning {
    /// Whether the bot cannot run at all with this problem
    #[must_use]
    pub const fn is_fatal_for_bot(&self) -> bool {
        matches!(self, Self::MissingBotToken | Self::InvalidChartSize { .. })
    }
}

impl AppConfig {
    /// Smallest accepted chart side in pixels
    pub const MIN_CHART_SIDE: u32 = 100;

    /// Largest accepted chart side in pixels
    pub const MAX_CHART_SIDE: u32 = 4096;

    /// Load configuration from the process environment and an optional file
    ///
    /// Without an explicit path, `config.toml` in the working directory is
    /// used if present. A `.env` file is read into the environment first.
    pub fn load(config_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {},
            Err(e) => return Err(config::ConfigError::Message(format!(".env: {e}"))),
        }

        let mut config = Self::from_sources(config_file, None)?;
        config.apply_legacy_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Build configuration from explicit sources
    ///
    /// `env` replaces the process environment for the `WEATHERBOT_*`
    /// overrides when given.
    pub fn from_sources(
        config_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file_source = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("telegram.api_base_url", "https://api.telegram.org")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            // Load from file if exists
            .add_source(file_source)
            // Override with environment variables (e.g., WEATHERBOT_WEATHER__API_KEY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Fill empty credentials and the default location from plain variables
    ///
    /// Values already set by the file or `WEATHERBOT_*` are never replaced.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.telegram.bot_token_str().is_none() {
            if let Some(token) = non_empty(LEGACY_BOT_TOKEN_VAR) {
                self.telegram.bot_token = Some(SecretString::from(token));
                debug!("Loaded telegram.bot_token from {LEGACY_BOT_TOKEN_VAR}");
            }
        }

        if self.weather.api_key_str().is_none() {
            if let Some(key) = non_empty(LEGACY_WEATHER_API_KEY_VAR) {
                self.weather.api_key = Some(SecretString::from(key));
                debug!("Loaded weather.api_key from {LEGACY_WEATHER_API_KEY_VAR}");
            }
        }

        if self.weather.default_location.trim().is_empty() {
            if let Some(location) = non_empty(LEGACY_LOCATION_VAR) {
                debug!(location = %location, "Loaded weather.default_location from {LEGACY_LOCATION_VAR}");
                self.weather.default_location = location;
            }
        }
    }

    /// Report configuration problems
    ///
    /// Nothing here aborts loading; callers decide which warnings are fatal.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.telegram.bot_token_str().is_none() {
            warnings.push(ConfigWarning::MissingBotToken);
        }
        if self.weather.api_key_str().is_none() {
            warnings.push(ConfigWarning::MissingWeatherApiKey);
        }
        if self.weather.default_location.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyDefaultLocation);
        }

        let side = Self::MIN_CHART_SIDE..=Self::MAX_CHART_SIDE;
        if !side.contains(&self.chart.width) || !side.contains(&self.chart.height) {
            warnings.push(ConfigWarning::InvalidChartSize {
                width: self.chart.width,
                height: self.chart.height,
            });
        }

        if self.telegram.poll_timeout_secs > 50 {
            warnings.push(ConfigWarning::PollTimeoutTooLong(
                self.telegram.poll_timeout_secs,
            ));
        }

        warnings
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[telegram]")?;
        writeln!(
            f,
            "  bot_token = {}",
            if self.telegram.bot_token_str().is_some() { "[set]" } else { "[missing]" }
        )?;
        writeln!(f, "  api_base_url = {}", self.telegram.api_base_url)?;
        writeln!(f, "  poll_timeout_secs = {}", self.telegram.poll_timeout_secs)?;
        writeln!(f, "[weather]")?;
        writeln!(
            f,
            "  api_key = {}",
            if self.weather.api_key_str().is_some() { "[set]" } else { "[missing]" }
        )?;
        writeln!(f, "  base_url = {}", self.weather.base_url)?;
        writeln!(f, "  default_location = {:?}", self.weather.default_location)?;
        writeln!(f, "[chart]")?;
        writeln!(f, "  size = {}x{}", self.chart.width, self.chart.height)?;
        match &self.chart.snapshot_path {
            Some(path) => writeln!(f, "  snapshot_path = {}", path.display())?,
            None => writeln!(f, "  snapshot_path = [none]")?,
        }
        writeln!(f, "  summary_caption = {}", self.chart.summary_caption)?;
        writeln!(f, "[logging]")?;
        write!(f, "  filter = {}, format = {}", self.logging.filter, self.logging.format)
    }
}
