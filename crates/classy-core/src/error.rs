//! Centralized error types for the Classy weather client.
//!
//! Every failure the UI can observe converts into [`AppError`], which carries
//! a short, non-technical `user_message()` alongside the full diagnostic text.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
        }
    }

    /// Cancellation is a normal outcome of typing quickly, never a failure to report.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Weather(WeatherError::Cancelled))
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read local storage: {0}")]
    Read(String),

    #[error("Failed to write local storage: {0}")]
    Write(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Read(_) => "Saved search could not be loaded.",
            StorageError::Write(_) => "Search could not be saved for next time.",
        }
    }
}

/// Weather lookup errors as seen by the application.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "Location not found. Check and try again.",
            WeatherError::Cancelled => "",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::from(NetworkError::Timeout),
            AppError::from(NetworkError::ConnectionFailed("refused".into())),
            AppError::from(NetworkError::InvalidResponse("bad json".into())),
            AppError::from(WeatherError::LocationNotFound("Xyzzyplace123".into())),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err}");
        }
    }

    #[test]
    fn test_server_error_message_depends_on_status() {
        let server = NetworkError::ServerError {
            status: 503,
            message: "unavailable".into(),
        };
        let client = NetworkError::ServerError {
            status: 400,
            message: "bad request".into(),
        };
        assert!(server.user_message().contains("later"));
        assert!(!client.user_message().contains("later"));
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = WeatherError::LocationNotFound("Nowhere".into()).into();
        assert!(matches!(
            app_err,
            AppError::Weather(WeatherError::LocationNotFound(_))
        ));
        assert_eq!(
            app_err.user_message(),
            "Location not found. Check and try again."
        );
    }

    #[test]
    fn test_storage_messages_are_non_empty() {
        assert!(!StorageError::Read("x".into()).user_message().is_empty());
        assert!(!StorageError::Write("x".into()).user_message().is_empty());
    }

    #[test]
    fn test_cancelled_is_recognised() {
        assert!(AppError::from(WeatherError::Cancelled).is_cancelled());
        assert!(!AppError::from(NetworkError::Timeout).is_cancelled());
    }
}
