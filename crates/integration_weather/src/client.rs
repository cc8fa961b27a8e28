//! OpenWeatherMap client
//!
//! HTTP client for `GET {base_url}/weather?q=..&appid=..&units=metric`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{CurrentWeatherResponse, WeatherObservation};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request never produced a response (connect, DNS, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a non-2xx HTTP status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The provider status code (`cod`) was not 200
    #[error("Location not found: {location} ({message})")]
    LocationNotFound {
        /// Location exactly as queried
        location: String,
        /// Provider message, empty if none was sent
        message: String,
    },

    /// The body was not JSON or lacked required fields
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The client could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key, sent as `appid`
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Weather client trait for current conditions
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch the current weather for a free-text location
    async fn current_weather(&self, location: &str) -> Result<WeatherObservation, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// An empty API key is accepted; the provider then rejects every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Endpoint URL without query parameters
    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    /// Turn a decoded body into an observation
    fn parse_response(
        location: &str,
        response: CurrentWeatherResponse,
    ) -> Result<WeatherObservation, WeatherError> {
        if !response.cod.as_ref().is_some_and(|cod| cod.is_success()) {
            return Err(WeatherError::LocationNotFound {
                location: location.to_string(),
                message: response.provider_message(),
            });
        }

        let description = response
            .conditions()
            .map_err(|e| WeatherError::ParseError(format!("weather: {e}")))?
            .and_then(|conditions| conditions.into_iter().next())
            .and_then(|first| first.description)
            .ok_or_else(|| WeatherError::ParseError("missing weather[0].description".into()))?;

        let main = response
            .readings()
            .map_err(|e| WeatherError::ParseError(format!("main: {e}")))?
            .ok_or_else(|| WeatherError::ParseError("missing main block".into()))?;

        let temperature_celsius = main
            .temp
            .ok_or_else(|| WeatherError::ParseError("missing main.temp".into()))?;

        if main.humidity.is_none() {
            return Err(WeatherError::ParseError("missing main.humidity".into()));
        }
        let humidity = main
            .whole_humidity()
            .ok_or_else(|| WeatherError::ParseError("main.humidity is not a whole number".into()))?;

        Ok(WeatherObservation {
            description,
            temperature_celsius,
            humidity,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, location: &str) -> Result<WeatherObservation, WeatherError> {
        let url = self.endpoint();
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.without_url().to_string()))?;

        let decoded: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        Self::parse_response(location, decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(location: &str, body: &str) -> Result<WeatherObservation, WeatherError> {
        let response: CurrentWeatherResponse = serde_json::from_str(body).unwrap();
        OpenWeatherMapClient::parse_response(location, response)
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = WeatherConfig {
            api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: WeatherConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenWeatherMapClient::new(WeatherConfig {
            base_url: "http://localhost:1234/data/2.5/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:1234/data/2.5/weather");
    }

    #[test]
    fn test_parse_success() {
        let observation = parse(
            "Paris",
            r#"{"cod": 200, "weather": [{"description": "clear sky"}], "main": {"temp": 18.5, "humidity": 60}}"#,
        )
        .unwrap();

        assert_eq!(observation.description, "clear sky");
        assert!((observation.temperature_celsius - 18.5).abs() < f64::EPSILON);
        assert_eq!(observation.humidity, 60);
    }

    #[test]
    fn test_parse_uses_first_condition() {
        let observation = parse(
            "Oslo",
            r#"{"cod": 200, "weather": [{"description": "light snow"}, {"description": "mist"}], "main": {"temp": -3.0, "humidity": 90}}"#,
        )
        .unwrap();
        assert_eq!(observation.description, "light snow");
    }

    #[test]
    fn test_parse_string_code_is_location_not_found() {
        let err = parse("Nowhereistan", r#"{"cod": "404", "message": "city not found"}"#)
            .unwrap_err();
        match err {
            WeatherError::LocationNotFound { location, message } => {
                assert_eq!(location, "Nowhereistan");
                assert_eq!(message, "city not found");
            },
            other => unreachable!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_code_is_location_not_found() {
        let err = parse(
            "Paris",
            r#"{"weather": [{"description": "clear sky"}], "main": {"temp": 18.5, "humidity": 60}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::LocationNotFound { .. }));
    }

    #[test]
    fn test_parse_missing_temp_is_parse_error() {
        let err = parse(
            "Paris",
            r#"{"cod": 200, "weather": [{"description": "clear sky"}], "main": {"humidity": 60}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(ref m) if m.contains("main.temp")));
    }

    #[test]
    fn test_parse_empty_weather_list_is_parse_error() {
        let err = parse(
            "Paris",
            r#"{"cod": 200, "weather": [], "main": {"temp": 1.0, "humidity": 60}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(_)));
    }

    #[test]
    fn test_parse_integral_float_humidity() {
        let observation = parse(
            "Paris",
            r#"{"cod": 200, "weather": [{"description": "fog"}], "main": {"temp": 1.0, "humidity": 60.0}}"#,
        )
        .unwrap();
        assert_eq!(observation.humidity, 60);
    }

    #[test]
    fn test_parse_error_code_wins_over_malformed_blocks() {
        let err = parse(
            "Nowhereistan",
            r#"{"cod": "404", "message": "city not found", "main": "x"}"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, WeatherError::LocationNotFound { ref message, .. } if message == "city not found")
        );
    }

    #[test]
    fn test_parse_malformed_main_on_success_is_parse_error() {
        let err = parse(
            "Paris",
            r#"{"cod": 200, "weather": [{"description": "fog"}], "main": "x"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(ref m) if m.starts_with("main")));
    }

    #[test]
    fn test_parse_fractional_humidity_is_parse_error() {
        let err = parse(
            "Paris",
            r#"{"cod": 200, "weather": [{"description": "fog"}], "main": {"temp": 1.0, "humidity": 60.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::ParseError(_)));
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::HttpStatus(503);
        assert_eq!(err.to_string(), "HTTP status 503");

        let err = WeatherError::LocationNotFound {
            location: "Atlantis".into(),
            message: "city not found".into(),
        };
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenWeatherMapClient::new(WeatherConfig::default()).is_ok());
    }
}
