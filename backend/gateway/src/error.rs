//! API errors and their HTTP mapping.
//!
//! Every error leaves the gateway as `{ "error": "<message>" }`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image provided")]
    MissingImage,

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    /// The request body could not be read or parsed.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The OCR provider failed. The cause is logged, never returned.
    #[error("Text detection failed")]
    Detection,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingImage | Self::InvalidImage(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Detection => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    /// Oversized bodies keep their 413; every other body problem is a 400.
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ApiError::MissingImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidImage("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Detection.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_client_safe() {
        assert_eq!(ApiError::MissingImage.to_string(), "No image provided");
        assert_eq!(ApiError::Detection.to_string(), "Text detection failed");
    }
}
