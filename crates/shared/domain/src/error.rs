//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).
//! Every error carries a stable machine-readable [`ErrorCode`] next to the
//! human message.

use thiserror::Error;

/// Machine-readable code identifying the rule that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Account input
    MissingName,
    MissingEmail,
    MissingPassword,
    InvalidEmail,
    WeakPassword,

    // Sweet input
    NameTooShort,
    NameTooLong,
    MissingCategory,
    InvalidPrice,
    NegativePrice,
    InvalidQuantity,
    NegativeQuantity,
    InvalidId,

    // Search
    InvalidMinPrice,
    InvalidMaxPrice,
    InvalidPriceRange,

    // Stock
    InsufficientStock,

    // Lookup / uniqueness
    SweetNotFound,
    DuplicateSweet,
    DuplicateEmail,

    // Access
    Forbidden,
    InvalidCredentials,

    // Persistence / primitives
    DeleteFailed,
    PasswordHashFailed,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingName => "MISSING_NAME",
            ErrorCode::MissingEmail => "MISSING_EMAIL",
            ErrorCode::MissingPassword => "MISSING_PASSWORD",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::WeakPassword => "WEAK_PASSWORD",
            ErrorCode::NameTooShort => "NAME_TOO_SHORT",
            ErrorCode::NameTooLong => "NAME_TOO_LONG",
            ErrorCode::MissingCategory => "MISSING_CATEGORY",
            ErrorCode::InvalidPrice => "INVALID_PRICE",
            ErrorCode::NegativePrice => "NEGATIVE_PRICE",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::NegativeQuantity => "NEGATIVE_QUANTITY",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::InvalidMinPrice => "INVALID_MIN_PRICE",
            ErrorCode::InvalidMaxPrice => "INVALID_MAX_PRICE",
            ErrorCode::InvalidPriceRange => "INVALID_PRICE_RANGE",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::SweetNotFound => "SWEET_NOT_FOUND",
            ErrorCode::DuplicateSweet => "DUPLICATE_SWEET",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::DeleteFailed => "DELETE_FAILED",
            ErrorCode::PasswordHashFailed => "PASSWORD_HASH_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or out-of-range input
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    /// Entity not found
    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    /// Entity already exists
    #[error("{message}")]
    Conflict { code: ErrorCode, message: String },

    /// Role check failed
    #[error("{message}")]
    Forbidden { code: ErrorCode, message: String },

    /// Bad credentials
    #[error("{message}")]
    Unauthorized { code: ErrorCode, message: String },

    /// The store did not do what it was asked to
    #[error("{message}")]
    Operation { code: ErrorCode, message: String },
}

impl DomainError {
    /// Create a validation error
    pub fn validation(code: ErrorCode, msg: impl Into<String>) -> Self {
        DomainError::Validation {
            code,
            message: msg.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(code: ErrorCode, msg: impl Into<String>) -> Self {
        DomainError::NotFound {
            code,
            message: msg.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(code: ErrorCode, msg: impl Into<String>) -> Self {
        DomainError::Conflict {
            code,
            message: msg.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        DomainError::Forbidden {
            code: ErrorCode::Forbidden,
            message: msg.into(),
        }
    }

    /// Bad email/password pair. Deliberately says nothing about which half was wrong.
    pub fn invalid_credentials() -> Self {
        DomainError::Unauthorized {
            code: ErrorCode::InvalidCredentials,
            message: "Invalid email or password".to_string(),
        }
    }

    /// Create an operational error
    pub fn operation(code: ErrorCode, msg: impl Into<String>) -> Self {
        DomainError::Operation {
            code,
            message: msg.into(),
        }
    }

    /// The rule that was violated.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation { code, .. }
            | DomainError::NotFound { code, .. }
            | DomainError::Conflict { code, .. }
            | DomainError::Forbidden { code, .. }
            | DomainError::Unauthorized { code, .. }
            | DomainError::Operation { code, .. } => *code,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
