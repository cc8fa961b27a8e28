//! Relative humidity as reported by the weather provider
//!
//! ```
//! use domain::value_objects::Humidity;
//!
//! let h = Humidity::new(60).expect("valid humidity");
//! assert_eq!(h.percent(), 60);
//! assert_eq!(h.to_string(), "60%");
//! assert!(Humidity::new(101).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a humidity value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid humidity: {0}% is out of range (must be 0-100)")]
pub struct InvalidHumidity(i64);

/// Relative humidity in whole percent, always within 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Humidity(u8);

impl Humidity {
    /// Completely dry air
    pub const MIN: Self = Self(0);
    /// Saturated air
    pub const MAX: Self = Self(100);

    /// Create a humidity value, rejecting anything above 100%
    pub const fn new(percent: u8) -> Result<Self, InvalidHumidity> {
        if percent > Self::MAX.0 {
            Err(InvalidHumidity(percent as i64))
        } else {
            Ok(Self(percent))
        }
    }

    /// Humidity in percent
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Humidity as a plain number, e.g. for plotting next to a temperature
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidHumidity(value))
            .and_then(Self::new)
    }
}

impl From<Humidity> for u8 {
    fn from(h: Humidity) -> Self {
        h.0
    }
}

impl<'de> Deserialize<'de> for Humidity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
