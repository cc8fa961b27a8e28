//! Application layer - Use cases and orchestration
//!
//! Contains the `/weather` pipeline, command parsing and dispatching, and the
//! port definitions implemented by the infrastructure adapters.

pub mod command_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use command_parser::CommandParser;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
