//! Auth Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or policy-violating input
    #[error("{0}")]
    Validation(String),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Unknown email or wrong password (never distinguished)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No usable identity on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller is not an admin
    #[error("Admin access required")]
    AdminRequired,

    /// Non-admin tried to change a role
    #[error("Only admins can update roles")]
    ForbiddenRoleChange,

    /// Admin tried to delete their own account
    #[error("You cannot delete your own account")]
    SelfDeleteForbidden,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Email taken at registration or creation
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Email taken by a different user on update
    #[error("Email is already in use")]
    EmailConflict,

    /// Update touched nothing
    #[error("No changes were made to the user")]
    NoChangesApplied,

    /// Hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Stored password hash cannot be parsed
    #[error("Stored password hash is malformed")]
    MalformedHash,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::PasswordMismatch => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::AdminRequired
            | AuthError::ForbiddenRoleChange
            | AuthError::SelfDeleteForbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailAlreadyExists
            | AuthError::EmailConflict
            | AuthError::NoChangesApplied => ErrorKind::Conflict,
            AuthError::Hashing(_)
            | AuthError::MalformedHash
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures render a generic message; details stay in logs.
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            return AppError::internal("Internal error");
        }
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::MalformedHash => {
                tracing::error!("Stored password hash could not be parsed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AdminRequired => {
                tracing::warn!("Admin-only operation refused");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::HashingFailed(msg) => AuthError::Hashing(msg),
            PasswordHashError::MalformedHash => AuthError::MalformedHash,
        }
    }
}
