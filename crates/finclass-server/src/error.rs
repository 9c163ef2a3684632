//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finclass_core::{InferenceError, ValidationError};
use tracing::error;

use crate::dto::ErrorResponse;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Request failures, split into client and server tiers.
#[derive(Debug)]
pub enum AppError {
    /// Body absent or not JSON.
    BadRequest(String),
    /// Body parsed but failed feature validation.
    Validation(ValidationError),
    /// Detail is logged, never returned.
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<InferenceError> for AppError {
    fn from(e: InferenceError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::BadRequest(message) => ErrorResponse::new(message),
            AppError::Validation(e) => {
                let mut body = ErrorResponse::new(e.to_string());
                match e {
                    ValidationError::MissingFields(fields) => body.missing_fields = Some(fields),
                    ValidationError::InvalidType { field } => body.field = Some(field),
                    ValidationError::NotAnObject => {}
                }
                body
            }
            AppError::Internal(detail) => {
                error!("Internal error: {}", detail);
                ErrorResponse::new(INTERNAL_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}
