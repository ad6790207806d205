//! Error types for the Biblion server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Book with id {0} is already borrowed")]
    AlreadyBorrowed(i64),

    #[error("No active loan for borrower {borrower_id} and book {book_id}")]
    NoActiveLoan { borrower_id: i64, book_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    reason: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, details) = match self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "ValidationFailed",
                "Validation failed".to_string(),
                fields,
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NotFound", msg, Vec::new()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg, Vec::new()),
            AppError::AlreadyBorrowed(book_id) => (
                StatusCode::CONFLICT,
                "AlreadyBorrowed",
                format!("Book with id {} is already borrowed", book_id),
                Vec::new(),
            ),
            AppError::NoActiveLoan {
                borrower_id,
                book_id,
            } => (
                StatusCode::CONFLICT,
                "NoActiveLoan",
                format!(
                    "No active loan for borrower {} and book {}",
                    borrower_id, book_id
                ),
                Vec::new(),
            ),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database",
                    "Database error".to_string(),
                    Vec::new(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal",
                    "Internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
