//! Application error types.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned for a missing or empty chat payload field.
pub const MISSING_FIELDS: &str = "Message and advisor_id are required";

/// Application-level errors with HTTP status mapping.
///
/// Store, provider and completion errors carry the underlying message, which
/// is returned to the caller unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("{0}")]
    IdentityProvider(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    StoreWrite(String),

    #[error("{0}")]
    StoreRead(String),

    #[error("Advisor not found")]
    AdvisorNotFound,

    #[error("{0}")]
    Completion(String),

    /// The request body could not be read (e.g. over the body size limit).
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AdvisorNotFound => StatusCode::NOT_FOUND,
            AppError::BodyRejected { status, .. } => *status,
            AppError::IdentityProvider(_)
            | AppError::StoreWrite(_)
            | AppError::StoreRead(_)
            | AppError::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            success: false,
        });
        (status, body).into_response()
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
