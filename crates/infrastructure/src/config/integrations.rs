//! Integration configurations: Weather provider, chart output.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Weather Configuration
// ==============================

/// Weather provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// OpenWeatherMap API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Location used when `/weather` has no arguments (may be empty)
    #[serde(default)]
    pub default_location: String,
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_location", &self.default_location)
            .finish()
    }
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_weather_timeout() -> u64 {
    30
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_secs: default_weather_timeout(),
            default_location: String::new(),
        }
    }
}

impl WeatherAppConfig {
    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }

    /// Build the integration client configuration
    ///
    /// A missing key is passed on as empty; the provider then rejects the
    /// request and the user sees the network failure text.
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key_str().unwrap_or_default().to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Chart Configuration
// ==============================

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartAppConfig {
    /// Image width in pixels
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_chart_height")]
    pub height: u32,

    /// Also write the latest chart to this file (last write wins)
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Caption chart photos with a one-line summary; off sends them bare
    #[serde(default)]
    pub summary_caption: bool,
}

const fn default_chart_width() -> u32 {
    800
}

const fn default_chart_height() -> u32 {
    600
}

impl Default for ChartAppConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            snapshot_path: None,
            summary_caption: false,
        }
    }
}
