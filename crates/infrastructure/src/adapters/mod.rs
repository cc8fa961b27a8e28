//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod chart_adapter;
mod telegram_adapter;
mod weather_adapter;

pub use chart_adapter::{ChartError, PlottersChartRenderer};
pub use telegram_adapter::TelegramMessenger;
pub use weather_adapter::WeatherAdapter;
