//! API error taxonomy and HTTP response mapping.
//!
//! Client mistakes (bad mode selections) map to 400 with the offending
//! values enumerated; cipher failures and anything unexpected map to
//! 500 with a generic message. Internal detail goes to the log, not to
//! the client. Every failure is request-local; nothing here is fatal
//! to the process.

use crate::cipher::CipherError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("At least one mode must be selected")]
    EmptyModes,

    #[error(
        "Invalid modes: {invalid:?}. Must be one or more of: \
         [\"numeric\", \"alphabetic\", \"alphanumeric\", \"symbolic\"]"
    )]
    InvalidModes { invalid: Vec<String> },

    #[error("Decryption failed: {0}")]
    Decryption(#[from] CipherError),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyModes | ApiError::InvalidModes { .. } => StatusCode::BAD_REQUEST,
            ApiError::Decryption(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
