//! Error types for the backend services.

use crate::config::ConfigError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for service startup and serving
pub type BackendResult<T> = Result<T, BackendError>;

/// Failures of a single weather lookup.
///
/// Each variant maps to an HTTP status and an `{"error": <message>}` body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Location is required")]
    MissingLocation,

    #[error("Weather API key is not configured")]
    NotConfigured,

    #[error("Invalid Weather API key")]
    InvalidApiKey,

    #[error("Weather data not found for location: {location}")]
    LocationNotFound { location: String },

    #[error("Failed to connect to Weather API: {message}")]
    Unreachable { message: String },

    #[error("Weather API error: {message}")]
    Upstream { status: u16, message: String },

    #[error("An internal server error occurred")]
    Internal { message: String },
}

impl WeatherError {
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::LocationNotFound {
            location: location.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status returned to the caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherError::MissingLocation => StatusCode::BAD_REQUEST,
            WeatherError::NotConfigured
            | WeatherError::InvalidApiKey
            | WeatherError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            WeatherError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
            WeatherError::Unreachable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WeatherError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

/// `{"error": "..."}` body returned by the backend services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&WeatherError> for ErrorBody {
    fn from(err: &WeatherError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Startup and serving failures.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
