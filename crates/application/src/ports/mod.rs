//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod chart_port;
mod messenger_port;
mod weather_port;

#[cfg(test)]
pub use chart_port::MockChartPort;
pub use chart_port::{ChartImage, ChartPort};
#[cfg(test)]
pub use messenger_port::MockMessengerPort;
pub use messenger_port::{MessengerPort, Reply};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{WeatherFailure, WeatherOutcome, WeatherPort};
