//! Wiring of adapters and services from configuration

use std::sync::Arc;

use application::ports::{ChartPort, MessengerPort, WeatherPort};
use application::{ApplicationError, CommandDispatcher, CommandParser, WeatherCommandService};
use domain::LocationQuery;
use infrastructure::{AppConfig, PlottersChartRenderer, WeatherAdapter};
use tracing::debug;

/// Build the `/weather` pipeline
pub fn build_weather_service(config: &AppConfig) -> Result<WeatherCommandService, ApplicationError> {
    let weather: Arc<dyn WeatherPort> =
        Arc::new(WeatherAdapter::with_config(config.weather.to_client_config())?);
    let chart: Arc<dyn ChartPort> = Arc::new(PlottersChartRenderer::from_config(&config.chart));
    let default_location = LocationQuery::new(config.weather.default_location.clone());

    let service = WeatherCommandService::new(weather, chart, default_location)
        .with_summary_caption(config.chart.summary_caption);
    Ok(match &config.chart.snapshot_path {
        Some(path) => {
            debug!(path = %path.display(), "Chart snapshots enabled");
            service.with_snapshot_path(path.clone())
        },
        None => service,
    })
}

/// Build the dispatcher answering chat messages
///
/// `bot_username` lets `/command@username` addressed to this bot through
/// while ignoring commands meant for other bots in the same group.
pub fn build_dispatcher(
    config: &AppConfig,
    messenger: Arc<dyn MessengerPort>,
    bot_username: Option<&str>,
) -> Result<CommandDispatcher, ApplicationError> {
    let parser = match bot_username {
        Some(username) => CommandParser::new().with_bot_username(username),
        None => CommandParser::new(),
    };

    Ok(CommandDispatcher::new(
        parser,
        build_weather_service(config)?,
        messenger,
    ))
}
