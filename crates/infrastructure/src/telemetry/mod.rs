//! Logging infrastructure
//!
//! Console logging through `tracing-subscriber`.

mod logging;

pub use logging::{LogFormat, LoggingConfig, LoggingError, build_filter, init_logging};
