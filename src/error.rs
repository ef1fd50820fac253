use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Message attached to every not-found error entry
pub const DEPARTMENT_NOT_FOUND: &str = "Department Not Found";

/// A single field-level error entry in an error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The key resolved to no record; carries the request description
    /// used as the `field` of the error entry.
    #[error("department not found: {0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// A path variable could not be parsed as the expected type
    #[error("{name} should be of type {expected}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    timestamp: DateTime<Utc>,
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AppError::NotFound(request) => (
                StatusCode::NOT_FOUND,
                vec![FieldError::new(request, DEPARTMENT_NOT_FOUND)],
            ),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            AppError::TypeMismatch { name, expected } => (
                StatusCode::BAD_REQUEST,
                vec![FieldError::new(
                    name,
                    format!("{} should be of type {}", name, expected),
                )],
            ),
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec![FieldError::new("server", "Internal Server Error")],
                )
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            timestamp: Utc::now(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application
pub type AppResult<T> = Result<T, AppError>;

/// Helper trait for converting Option to AppError::NotFound
pub trait OptionExt<T> {
    fn ok_or_not_found(self, request: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, request: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(request.into()))
    }
}
