//! Logging initialization
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and a console `fmt`
//! layer, either human-readable or JSON lines.

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines with timestamp and level
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "weatherbot=debug,reqwest=warn")
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "weatherbot=info,info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the filter for the subscriber
///
/// Precedence: `override_filter` (e.g. from `-v` flags), then `RUST_LOG`,
/// then the configured filter.
pub fn build_filter(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<EnvFilter, LoggingError> {
    if let Some(directive) = override_filter {
        return parse_filter(directive);
    }

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.filter),
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Initialize logging with the given configuration
///
/// Must be called once, before the first event is emitted.
pub fn init_logging(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<(), LoggingError> {
    let env_filter = build_filter(config, override_filter)?;

    let (pretty_layer, json_layer) = match config.format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_target(true)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    info!(format = %config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "weatherbot=info,info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_deserialize_json_format() {
        let json = r#"{"format": "json"}"#;
        let parsed: LoggingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.format, LogFormat::Json);
        assert_eq!(parsed.filter, "weatherbot=info,info");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_override_filter_wins() {
        let config = LoggingConfig {
            filter: "error".to_string(),
            ..Default::default()
        };
        let filter = build_filter(&config, Some("debug")).unwrap();
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = build_filter(&LoggingConfig::default(), Some("weatherbot=loud")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }
}
