//! OpenWeatherMap response models
//!
//! Every field is optional on the wire. The provider answers errors with the
//! same envelope (`cod` + `message`) and a 2xx status on some plans, so
//! presence is checked after deserialization. The `weather` and `main`
//! blocks stay raw JSON until `cod` has been checked; a malformed block in
//! an error payload must not hide the provider's verdict.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Provider status code (`cod`)
///
/// Successful responses carry the number `200`, error payloads usually a
/// string such as `"404"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProviderCode {
    /// Numeric code
    Number(f64),
    /// Textual code
    Text(String),
    /// Anything else the provider might send
    Other(serde_json::Value),
}

impl ProviderCode {
    /// Only the number 200 counts as success; the string `"200"` does not
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Number(code) if (code - 200.0).abs() < f64::EPSILON)
    }
}

impl std::fmt::Display for ProviderCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Body of `GET /weather`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Provider status code
    #[serde(default)]
    pub cod: Option<ProviderCode>,

    /// Provider error message (only on failures)
    #[serde(default)]
    pub message: Option<serde_json::Value>,

    /// Weather conditions, most significant first
    #[serde(default)]
    pub weather: Option<serde_json::Value>,

    /// Temperature and humidity block
    #[serde(default)]
    pub main: Option<serde_json::Value>,
}

impl CurrentWeatherResponse {
    /// Provider message as text, empty if none was sent
    #[must_use]
    pub fn provider_message(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Decode the `weather` list
    pub fn conditions(&self) -> Result<Option<Vec<CurrentConditions>>, serde_json::Error> {
        decode_block(self.weather.as_ref())
    }

    /// Decode the `main` block
    pub fn readings(&self) -> Result<Option<MainReadings>, serde_json::Error> {
        decode_block(self.main.as_ref())
    }
}

fn decode_block<T: DeserializeOwned>(
    value: Option<&serde_json::Value>,
) -> Result<Option<T>, serde_json::Error> {
    value.map(T::deserialize).transpose()
}

/// Entry of the `weather` list
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    /// Condition group, e.g. "Clouds"
    #[serde(default)]
    pub main: Option<String>,

    /// Free-text description, e.g. "scattered clouds"
    #[serde(default)]
    pub description: Option<String>,
}

/// The `main` block
#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    /// Temperature in the requested units (°C for `units=metric`)
    #[serde(default)]
    pub temp: Option<f64>,

    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: Option<serde_json::Number>,
}

impl MainReadings {
    /// Humidity as a whole number; `60.0` counts, `60.5` does not
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn whole_humidity(&self) -> Option<i64> {
        let humidity = self.humidity.as_ref()?;
        humidity.as_i64().or_else(|| {
            humidity
                .as_f64()
                .filter(|value| value.fract().abs() < f64::EPSILON && value.abs() <= 1e15)
                .map(|value| value as i64)
        })
    }
}

/// Normalized reading extracted from a successful response
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Description exactly as the provider sent it
    pub description: String,
    /// Temperature in °C
    pub temperature_celsius: f64,
    /// Relative humidity in percent, not yet range-checked
    pub humidity: i64,
}
