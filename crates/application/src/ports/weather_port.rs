//! Weather service port
//!
//! Defines the interface for looking up the current weather of a location.

use async_trait::async_trait;
use domain::{LocationQuery, WeatherReport};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Why a weather lookup produced no report
///
/// The `Display` output is the exact text sent back to the chat. Causes are
/// logged by the adapter and never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherFailure {
    /// The provider could not resolve the queried name
    #[error("Unable to fetch weather for {location}. Please check the city name and try again.")]
    InvalidLocation {
        /// The location exactly as queried
        location: LocationQuery,
    },

    /// Transport-level failure (connection, timeout, DNS, non-2xx status)
    #[error("Unable to fetch weather due to a network issue. Please try again later.")]
    Network,

    /// Anything else: malformed payload, missing fields, rendering failure
    #[error("An unexpected error occurred. Please try again later.")]
    Unexpected,
}

impl WeatherFailure {
    /// Build an invalid-location failure for the given query
    #[must_use]
    pub fn invalid_location(location: &LocationQuery) -> Self {
        Self::InvalidLocation {
            location: location.clone(),
        }
    }

    /// Short machine-readable kind for log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLocation { .. } => "invalid_location",
            Self::Network => "network_failure",
            Self::Unexpected => "unexpected_failure",
        }
    }
}

/// Tagged result of a weather lookup
pub type WeatherOutcome = Result<WeatherReport, WeatherFailure>;

/// Port for weather lookups
///
/// Implementations issue exactly one provider request per call, never retry
/// and never cache. Every failure is classified into a [`WeatherFailure`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the current weather for a location
    async fn fetch(&self, location: &LocationQuery) -> WeatherOutcome;
}
