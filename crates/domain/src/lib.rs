//! Domain layer for WeatherBot
//!
//! Contains the weather report entity, bot commands, value objects and
//! domain errors. This layer performs no I/O.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use commands::BotCommand;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
