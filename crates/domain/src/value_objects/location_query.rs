//! Location query - the free-text city name sent to the weather provider

use serde::{Deserialize, Serialize};
use std::fmt;

/// A city name exactly as the user (or the configuration) supplied it
///
/// The query is never validated or normalised; an unknown or empty name is
/// only detected by the provider's response.
///
/// ```
/// use domain::value_objects::LocationQuery;
///
/// let default = LocationQuery::new("Berlin");
/// let args = vec!["New".to_string(), "York".to_string()];
///
/// assert_eq!(LocationQuery::from_args(&args, &default).as_str(), "New York");
/// assert_eq!(LocationQuery::from_args(&[], &default).as_str(), "Berlin");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Wrap a location string verbatim
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Build the query from command arguments
    ///
    /// The arguments are joined with single spaces. Without arguments the
    /// `default` location is used, even if it is empty.
    #[must_use]
    pub fn from_args(args: &[String], default: &Self) -> Self {
        if args.is_empty() {
            default.clone()
        } else {
            Self(args.join(" "))
        }
    }

    /// The location string as sent to the provider
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no location was given at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for LocationQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
