//! Weather command service - the `/weather` pipeline
//!
//! Resolves the location, fetches the weather, renders the chart and turns
//! the result into a [`Reply`]. Every path ends in a reply; nothing here
//! returns an error to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use domain::{LocationQuery, WeatherReport};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{ChartImage, ChartPort, Reply, WeatherFailure, WeatherPort};

/// Orchestrates one `/weather` command
pub struct WeatherCommandService {
    weather: Arc<dyn WeatherPort>,
    chart: Arc<dyn ChartPort>,
    default_location: LocationQuery,
    snapshot_path: Option<PathBuf>,
    summary_caption: bool,
}

impl std::fmt::Debug for WeatherCommandService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherCommandService")
            .field("default_location", &self.default_location)
            .field("snapshot_path", &self.snapshot_path)
            .field("summary_caption", &self.summary_caption)
            .finish_non_exhaustive()
    }
}

impl WeatherCommandService {
    /// Create the service
    ///
    /// `default_location` is used when `/weather` has no arguments. It may be
    /// empty, in which case the empty string is sent to the provider.
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        chart: Arc<dyn ChartPort>,
        default_location: LocationQuery,
    ) -> Self {
        Self {
            weather,
            chart,
            default_location,
            snapshot_path: None,
            summary_caption: false,
        }
    }

    /// Also write every rendered chart to `path` (last write wins)
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Caption photos with the report summary instead of sending them bare
    #[must_use]
    pub const fn with_summary_caption(mut self, enabled: bool) -> Self {
        self.summary_caption = enabled;
        self
    }

    /// Location used when no arguments are given
    pub const fn default_location(&self) -> &LocationQuery {
        &self.default_location
    }

    /// Run the pipeline for the raw command arguments
    #[instrument(skip(self, args), fields(location))]
    pub async fn handle_weather_command(&self, args: &[String]) -> Reply {
        let location = LocationQuery::from_args(args, &self.default_location);
        tracing::Span::current().record("location", location.as_str());

        let report = match self.weather.fetch(&location).await {
            Ok(report) => report,
            Err(failure) => {
                info!(kind = failure.kind(), "Weather lookup failed");
                return Reply::Text(failure.to_string());
            },
        };

        debug!(
            description = report.description(),
            temperature = report.temperature_celsius(),
            humidity = report.humidity().percent(),
            "Weather report received"
        );

        match self.render_chart(&location, &report).await {
            Ok(image) => {
                self.store_snapshot(&image).await;
                let caption = if self.summary_caption {
                    report.summary()
                } else {
                    String::new()
                };
                Reply::Photo { image, caption }
            },
            Err(e) => {
                error!(error = %e, "Chart rendering failed");
                Reply::Text(WeatherFailure::Unexpected.to_string())
            },
        }
    }

    async fn render_chart(
        &self,
        location: &LocationQuery,
        report: &WeatherReport,
    ) -> Result<ChartImage, ApplicationError> {
        let chart = Arc::clone(&self.chart);
        let location = location.clone();
        let report = report.clone();

        tokio::task::spawn_blocking(move || chart.render(&location, &report))
            .await
            .map_err(|e| ApplicationError::Internal(format!("render task failed: {e}")))?
    }

    async fn store_snapshot(&self, image: &ChartImage) {
        let Some(path) = &self.snapshot_path else {
            return;
        };

        match tokio::fs::write(path, image.bytes()).await {
            Ok(()) => debug!(path = %path.display(), "Chart snapshot written"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to write chart snapshot"),
        }
    }
}
