//! Error types and handling for `climate-compare`

use thiserror::Error;

/// Main error type for the climate comparison
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather or geocoding API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Arguments outside the domain of an operation (bad month, empty series)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The geocoding service returned no candidate for a place name
    #[error("Location not found: {name}")]
    LocationNotFound { name: String },

    /// Response cache errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ClimateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(name: S) -> Self {
        Self::LocationNotFound { name: name.into() }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            ClimateError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            ClimateError::InvalidArgument { message } => format!("Invalid input: {message}"),
            ClimateError::LocationNotFound { name } => {
                format!("LOCATION {name} NOT FOUND. Check the spelling of the place name.")
            }
            ClimateError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            ClimateError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ClimateError::config("bad timezone");
        assert!(matches!(config_err, ClimateError::Config { .. }));

        let api_err = ClimateError::api("connection failed");
        assert!(matches!(api_err, ClimateError::Api { .. }));

        let arg_err = ClimateError::invalid_argument("month 13");
        assert!(matches!(arg_err, ClimateError::InvalidArgument { .. }));
    }

    #[test]
    fn test_user_messages() {
        let api_err = ClimateError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let arg_err = ClimateError::invalid_argument("month 13 is out of range");
        assert!(arg_err.user_message().contains("month 13"));

        let missing = ClimateError::location_not_found("Irvinewieuhf");
        assert!(missing.user_message().contains("Irvinewieuhf"));
        assert_eq!(missing.to_string(), "Location not found: Irvinewieuhf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClimateError = io_err.into();
        assert!(matches!(err, ClimateError::Io { .. }));
    }
}
