//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snippet_core::SnippetError;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "snippet not found";

/// Error returned by route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(id) => {
                tracing::debug!("Snippet not found: {}", id);
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
            }
            ApiError::BadRequest(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

impl From<SnippetError> for ApiError {
    fn from(e: SnippetError) -> Self {
        match e {
            SnippetError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
