//! Error types and handling for the `cielo` application

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Main error type for the `cielo` application
#[derive(Error, Debug)]
pub enum CieloError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("Upstream error: {message}")]
    Upstream { message: String },

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

impl CieloError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CieloError::Config { .. } => {
                "Configuration error. Please check your environment and API keys.".to_string()
            }
            CieloError::Upstream { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            CieloError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CieloError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for CieloError {
    fn from(err: reqwest::Error) -> Self {
        CieloError::upstream(err.to_string())
    }
}

/// Error surface of the proxy endpoints
///
/// Missing required query parameters become HTTP 400 with a JSON error body;
/// a transport-level upstream failure becomes HTTP 502. Upstream HTTP errors
/// never take this path, their status and body are relayed verbatim.
#[derive(Debug)]
pub enum ApiError {
    /// Required query parameter missing
    MissingParameter(&'static str),
    /// The upstream call itself failed (DNS, connect, timeout)
    UpstreamUnreachable(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::UpstreamUnreachable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingParameter(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            ApiError::UpstreamUnreachable(message) => {
                tracing::warn!("Upstream unreachable: {}", message);
                (StatusCode::BAD_GATEWAY, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = CieloError::config("missing API key");
        assert!(matches!(config_err, CieloError::Config { .. }));

        let upstream_err = CieloError::upstream("connection failed");
        assert!(matches!(upstream_err, CieloError::Upstream { .. }));

        let validation_err = CieloError::validation("invalid coordinates");
        assert!(matches!(validation_err, CieloError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = CieloError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let upstream_err = CieloError::upstream("test");
        assert!(upstream_err.user_message().contains("Unable to reach"));

        let validation_err = CieloError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cielo_err: CieloError = io_err.into();
        assert!(matches!(cielo_err, CieloError::Io { .. }));
    }

    #[test]
    fn test_missing_parameter_is_bad_request() {
        let response = ApiError::MissingParameter("Missing coordinates").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
