//! Error types for the Dublin Core indexing service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error codes returned in API error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    BadValue = 1,
    MalformedRecord = 2,
    MissingIdentifier = 3,
}

/// Errors raised while building a record from a payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DcError {
    /// The payload could not be parsed into a document tree
    #[error("Malformed record payload: {0}")]
    MalformedInput(String),

    /// The payload has no record ID and the origin identifier has no
    /// `prefix:source:` segments to derive one from
    #[error("Cannot derive a record ID from origin identifier '{0}'")]
    AmbiguousOriginIdentifier(String),
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Record(#[from] DcError),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Record(e @ DcError::MalformedInput(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::MalformedRecord, e.to_string())
            }
            AppError::Record(e @ DcError::AmbiguousOriginIdentifier(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::MissingIdentifier, e.to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
