//! WeatherBot presentation layer
//!
//! Command-line interface, wiring and the Telegram update loop for the
//! `weatherbot` binary.

pub mod bootstrap;
pub mod cli;
pub mod polling;
pub mod shutdown;

pub use bootstrap::{build_dispatcher, build_weather_service};
pub use cli::{Cli, Commands, log_filter_from_verbosity};
pub use polling::{PollSettings, UpdatePoller, next_offset};
pub use shutdown::shutdown_signal;
