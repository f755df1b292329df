//! Error types for the place explorer workflow
//!
//! Every external call failure is caught at its call site and converted into
//! the next fallback tier or an empty/default result; these variants exist so
//! call sites can log precisely and so the UI can show a non-blocking status
//! line. An empty search result is not an error.

use thiserror::Error;

use crate::sensor::SensorError;

/// Main error type for the place explorer workflow
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Device geolocation sensor failures (denied, timeout, unavailable)
    #[error("Sensor error: {source}")]
    Sensor {
        #[from]
        source: SensorError,
    },

    /// Network-address based location lookup failed on all providers
    #[error("Network location lookup failed: {message}")]
    NetworkLookup { message: String },

    /// Forward geocoding (text -> places) request failed
    #[error("Geocoding search failed: {message}")]
    GeocodeSearch { message: String },

    /// Reverse geocoding (coordinate -> name/address) request failed
    #[error("Reverse geocoding failed: {message}")]
    ReverseGeocode { message: String },

    /// Provider payloads that could not be interpreted
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ExplorerError {
    /// Create a new network lookup error
    pub fn network_lookup<S: Into<String>>(message: S) -> Self {
        Self::NetworkLookup {
            message: message.into(),
        }
    }

    /// Create a new geocoding search error
    pub fn geocode_search<S: Into<String>>(message: S) -> Self {
        Self::GeocodeSearch {
            message: message.into(),
        }
    }

    /// Create a new reverse geocoding error
    pub fn reverse_geocode<S: Into<String>>(message: S) -> Self {
        Self::ReverseGeocode {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short status line suitable for an inline, non-blocking indicator
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Sensor { .. } | ExplorerError::NetworkLookup { .. } => {
                "Could not get location".to_string()
            }
            ExplorerError::GeocodeSearch { .. } => "Search is unavailable right now".to_string(),
            ExplorerError::ReverseGeocode { .. } => "Address details unavailable".to_string(),
            ExplorerError::Parse { .. } => "Received an unexpected response".to_string(),
            ExplorerError::Validation { message } => format!("Invalid input: {message}"),
            ExplorerError::Config { .. } => {
                "Configuration error. Please check your settings.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let lookup_err = ExplorerError::network_lookup("both providers failed");
        assert!(matches!(lookup_err, ExplorerError::NetworkLookup { .. }));

        let search_err = ExplorerError::geocode_search("connection refused");
        assert!(matches!(search_err, ExplorerError::GeocodeSearch { .. }));

        let validation_err = ExplorerError::validation("latitude out of range");
        assert!(matches!(validation_err, ExplorerError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let lookup_err = ExplorerError::network_lookup("test");
        assert_eq!(lookup_err.user_message(), "Could not get location");

        let validation_err = ExplorerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_sensor_error_conversion() {
        let sensor_err: ExplorerError = SensorError::PermissionDenied.into();
        assert!(matches!(sensor_err, ExplorerError::Sensor { .. }));
        assert_eq!(sensor_err.user_message(), "Could not get location");
    }
}
