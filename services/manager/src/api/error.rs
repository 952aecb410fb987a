//! HTTP error responses for the provider API.
//!
//! Protocol peers are machines, so diagnostics are plain text rather
//! than a structured problem document.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::manager::ManagerError;

/// An error response: a status code and a human-readable reason.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: message.into(),
        }
    }

    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_ACCEPTABLE,
            message: message.into(),
        }
    }

    pub fn not_implemented() -> Self {
        Self {
            status: StatusCode::NOT_IMPLEMENTED,
            message: String::new(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::NotSubscribed { .. }
            | ManagerError::MissingStreamId
            | ManagerError::StreamIdMismatch { .. } => ApiError::bad_request(err.to_string()),
            ManagerError::NotImplemented => ApiError::not_implemented(),
            ManagerError::Terminated => ApiError::internal(err.to_string()),
            // Publish errors never surface through the HTTP path.
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
