//! Weather report - the normalized result of one weather lookup

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::Humidity;

/// Current conditions for a location, as shown to the user
///
/// Built once per `/weather` command and dropped after the reply is sent.
///
/// ```
/// use domain::{Humidity, WeatherReport};
///
/// let report = WeatherReport::new("clear sky", 18.5, Humidity::new(60).unwrap()).unwrap();
/// assert_eq!(report.description(), "Clear sky");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    description: String,
    temperature_celsius: f64,
    humidity: Humidity,
}

impl WeatherReport {
    /// Create a report, capitalizing the provider's condition text
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurement` if the temperature is not a
    /// finite number.
    pub fn new(
        description: impl AsRef<str>,
        temperature_celsius: f64,
        humidity: Humidity,
    ) -> Result<Self, DomainError> {
        if !temperature_celsius.is_finite() {
            return Err(DomainError::invalid_measurement(format!(
                "temperature must be finite, got {temperature_celsius}"
            )));
        }

        Ok(Self {
            description: capitalize(description.as_ref()),
            temperature_celsius,
            humidity,
        })
    }

    /// Capitalized condition text, e.g. "Light rain"
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Temperature in degrees Celsius
    #[must_use]
    pub const fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    /// Relative humidity
    #[must_use]
    pub const fn humidity(&self) -> Humidity {
        self.humidity
    }

    /// One-line summary used as photo caption and CLI output
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {:.1}°C, humidity {}",
            self.description, self.temperature_celsius, self.humidity
        )
    }
}

/// Upper-case the first character and lower-case the rest
///
/// ```
/// assert_eq!(domain::entities::capitalize("OVERCAST clouds"), "Overcast clouds");
/// ```
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humidity(percent: u8) -> Humidity {
        Humidity::new(percent).unwrap()
    }

    #[test]
    fn description_is_capitalized() {
        let report = WeatherReport::new("clear sky", 18.5, humidity(60)).unwrap();
        assert_eq!(report.description(), "Clear sky");
        assert!((report.temperature_celsius() - 18.5).abs() < f64::EPSILON);
        assert_eq!(report.humidity().percent(), 60);
    }

    #[test]
    fn non_finite_temperature_is_rejected() {
        assert!(WeatherReport::new("fog", f64::NAN, humidity(90)).is_err());
        assert!(WeatherReport::new("fog", f64::INFINITY, humidity(90)).is_err());
    }

    #[test]
    fn negative_temperature_is_kept() {
        let report = WeatherReport::new("snow", -12.25, humidity(100)).unwrap();
        assert!((report.temperature_celsius() + 12.25).abs() < f64::EPSILON);
    }

    #[test]
    fn capitalize_lowercases_the_tail() {
        assert_eq!(capitalize("LIGHT RAIN"), "Light rain");
        assert_eq!(capitalize("broken clouds"), "Broken clouds");
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("überall Regen"), "Überall regen");
    }

    #[test]
    fn summary_contains_all_values() {
        let report = WeatherReport::new("mist", 3.0, humidity(87)).unwrap();
        assert_eq!(report.summary(), "Mist, 3.0°C, humidity 87%");
    }
}
