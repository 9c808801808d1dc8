//! Error taxonomy shared by the store client and the components built on it.
//!
//! Absence (a missing player, key or hash field) is not an error: operations
//! return `Option::None` for it. Everything else falls into one of the variants
//! below, and the HTTP layer maps each variant to a distinct status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Rejected before any store call was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Connectivity failure, timeout, or an error reported by the store itself.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A cached object could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Error::StoreUnavailable(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Codec(err.to_string())
    }
}

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
