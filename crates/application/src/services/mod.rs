//! Application services - command handling use cases

mod command_dispatcher;
pub mod command_texts;
mod weather_command_service;

pub use command_dispatcher::CommandDispatcher;
pub use weather_command_service::WeatherCommandService;
