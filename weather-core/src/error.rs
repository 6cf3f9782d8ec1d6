//! Error types for the upstream client and the HTTP handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message used when the upstream rejected a request without saying why.
pub const FALLBACK_MESSAGE: &str = "request failed";

/// Failure while talking to the OpenWeather API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-success status.
    #[error("OpenWeather request failed with status {status}: {body}")]
    Http {
        status: u16,
        /// The `message` field of the upstream JSON error, when present.
        message: Option<String>,
        /// Raw (truncated) response body.
        body: String,
    },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse OpenWeather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error returned by `GET /api/weather`, rendered as `{"error": ...}`.
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("city is required")]
    MissingCity,

    /// The query string could not be decoded.
    #[error("{0}")]
    BadQuery(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCity | Self::BadQuery(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http { status, message, .. } => Self::Upstream {
                status,
                message: message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            },
            other => Self::Unexpected(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(%status, error = %self, "weather request failed");
        } else {
            tracing::warn!(%status, error = %self, "weather request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
