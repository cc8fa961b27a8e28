//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenWeatherMap
//! weather adapter, the plotters chart renderer and the Telegram messenger.
//! Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ChartAppConfig, ConfigWarning, TelegramAppConfig, WeatherAppConfig};
pub use telemetry::{LogFormat, LoggingConfig, LoggingError, init_logging};
