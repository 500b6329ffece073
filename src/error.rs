//! Error types and handling for `WeatherDash`

use thiserror::Error;

/// Main error type for the `WeatherDash` library
#[derive(Error, Debug)]
pub enum WeatherDashError {
    /// The upstream reported that no such location exists (HTTP 404)
    #[error("Location not found: {message}")]
    NotFound { message: String },

    /// Any other non-success response, transport failure or unreadable body
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherDashError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new upstream error without an HTTP status
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new upstream error carrying the HTTP status it was mapped from
    pub fn upstream_status<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Upstream {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherDashError::NotFound { .. } => {
                "Location not found. Check the name and try again.".to_string()
            }
            WeatherDashError::Upstream { .. } => {
                "Unable to retrieve weather data. Please try again later.".to_string()
            }
            WeatherDashError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and API key.")
            }
            WeatherDashError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherDashError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
