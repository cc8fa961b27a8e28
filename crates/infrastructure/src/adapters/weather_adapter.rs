//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{WeatherFailure, WeatherOutcome, WeatherPort};
use async_trait::async_trait;
use domain::{Humidity, LocationQuery, WeatherReport};
use integration_weather::{
    OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError, WeatherObservation,
};
use tracing::{error, info, instrument, warn};

/// Adapter for the OpenWeatherMap current-weather endpoint
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to the user-facing failure
    ///
    /// The cause is logged here and dropped.
    fn map_error(location: &LocationQuery, err: WeatherError) -> WeatherFailure {
        match err {
            WeatherError::RequestFailed(_) | WeatherError::HttpStatus(_) => {
                warn!(error = %err, "Weather request failed");
                WeatherFailure::Network
            },
            WeatherError::LocationNotFound { message, .. } => {
                info!(provider_message = %message, "Provider rejected location");
                WeatherFailure::invalid_location(location)
            },
            WeatherError::ParseError(_) | WeatherError::Configuration(_) => {
                error!(error = %err, "Unexpected weather response");
                WeatherFailure::Unexpected
            },
        }
    }

    /// Convert a raw observation into a validated report
    fn to_report(observation: WeatherObservation) -> Result<WeatherReport, WeatherFailure> {
        let humidity = Humidity::try_from(observation.humidity).map_err(|e| {
            error!(error = %e, "Provider sent humidity out of range");
            WeatherFailure::Unexpected
        })?;

        WeatherReport::new(
            &observation.description,
            observation.temperature_celsius,
            humidity,
        )
        .map_err(|e| {
            error!(error = %e, "Provider sent an invalid reading");
            WeatherFailure::Unexpected
        })
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn fetch(&self, location: &LocationQuery) -> WeatherOutcome {
        info!("Fetching weather");

        match self.client.current_weather(location.as_str()).await {
            Ok(observation) => Self::to_report(observation),
            Err(e) => Err(Self::map_error(location, e)),
        }
    }
}
