//! Error types for Lendshelf server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    BadValue = 4,
    NoSuchBook = 5,
    BookNotAvailable = 7,
    Duplicate = 8,
    InvalidFilter = 9,
    InvalidAction = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Book is already rented")]
    AlreadyRented,

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    /// Keeps the first message, fields taken in name order
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::Validation(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
            _ => "Malformed JSON request body",
        };
        AppError::Validation(message.to_string())
    }
}

impl From<QueryRejection> for AppError {
    /// The only typed catalog parameter is `year`, so a repeated `year`
    /// key reads as an invalid year
    fn from(rejection: QueryRejection) -> Self {
        let detail = rejection.body_text();
        tracing::debug!("Rejected query string: {}", detail);
        if detail.contains("`year`") {
            AppError::InvalidFilter("Invalid year filter".to_string())
        } else {
            AppError::InvalidFilter("Invalid filter".to_string())
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::DuplicateUsername => (
                StatusCode::CONFLICT,
                ErrorCode::Duplicate,
                "Username already exists".to_string(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::NotAuthorized,
                "Invalid credentials".to_string(),
            ),
            AppError::InvalidFilter(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidFilter, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook, msg.clone()),
            AppError::AlreadyRented => (
                StatusCode::CONFLICT,
                ErrorCode::BookNotAvailable,
                "Book is already rented".to_string(),
            ),
            AppError::InvalidAction(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidAction,
                "Invalid action".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

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
