//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid command format or parameters
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A measured value is outside its physical range
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid measurement error
    pub fn invalid_measurement(reason: impl Into<String>) -> Self {
        Self::InvalidMeasurement(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_command_error_message() {
        let err = DomainError::InvalidCommand("unknown".to_string());
        assert_eq!(err.to_string(), "Invalid command: unknown");
    }

    #[test]
    fn invalid_measurement_error_message() {
        let err = DomainError::invalid_measurement("temperature is NaN");
        assert_eq!(err.to_string(), "Invalid measurement: temperature is NaN");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
