//! Unified boundary error handling.
//!
//! Every failure that leaves a service is an [`AppError`]: a kind, a stable
//! machine-readable code and a message. The kind alone decides the HTTP
//! status; the failure envelope is `{ success: false, message, code }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, ErrorCode};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    // Authentication & Authorization
    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    // The store or a primitive did not do what it was asked to
    #[error("{message}")]
    Operation { code: &'static str, message: String },

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Failure envelope
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    code: &'static str,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::Operation { code, .. } => *code,
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "INVALID_TOKEN",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            message: self.user_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { code, message } => AppError::Validation {
                code: code.as_str(),
                message,
            },
            DomainError::NotFound { code, message } => AppError::NotFound {
                code: code.as_str(),
                message,
            },
            DomainError::Conflict { code, message } => AppError::Conflict {
                code: code.as_str(),
                message,
            },
            DomainError::Forbidden { code, message } => AppError::Forbidden {
                code: code.as_str(),
                message,
            },
            DomainError::Unauthorized { code, message } => AppError::Unauthorized {
                code: code.as_str(),
                message,
            },
            DomainError::Operation { code, message } => AppError::Operation {
                code: code.as_str(),
                message,
            },
        }
    }
}

// A unique index rejecting a write is a lost race on a duplicate, not a fault.
#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!("Unique constraint violation: {}", detail);
                AppError::Conflict {
                    code: "DUPLICATE_ENTRY",
                    message: "Duplicate entry".to_string(),
                }
            }
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, code: ErrorCode, message: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, code: ErrorCode, message: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound {
            code: code.as_str(),
            message: message.to_string(),
        })
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(code: &'static str, msg: impl Into<String>) -> Self {
        AppError::Validation {
            code,
            message: msg.into(),
        }
    }

    pub fn unauthorized(code: &'static str, msg: impl Into<String>) -> Self {
        AppError::Unauthorized {
            code,
            message: msg.into(),
        }
    }

    pub fn not_found(code: &'static str, msg: impl Into<String>) -> Self {
        AppError::NotFound {
            code,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
