//! Drive Error Types
//!
//! Drive-routing error variants. Failures raised by the accounts context
//! (identity, admin checks) pass through unchanged.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Drive-specific result type alias
pub type DriveResult<T> = Result<T, DriveError>;

/// Drive-specific error variants
#[derive(Debug, Error)]
pub enum DriveError {
    /// Malformed mapping input
    #[error("{0}")]
    Validation(String),

    /// Caller's email has no routable domain
    #[error("Invalid email domain")]
    InvalidEmailDomain,

    /// Mapping id does not exist
    #[error("Domain mapping not found")]
    MappingNotFound,

    /// No mapping matched and no default is configured
    #[error("No drive mapping found for your domain")]
    NoMappingAvailable,

    /// Identity or authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DriveError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DriveError::Validation(_) | DriveError::InvalidEmailDomain => ErrorKind::BadRequest,
            DriveError::MappingNotFound | DriveError::NoMappingAvailable => ErrorKind::NotFound,
            DriveError::Auth(e) => e.kind(),
            DriveError::Database(_) | DriveError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            DriveError::Auth(e) => e.to_app_error(),
            _ if self.kind().is_server_error() => AppError::internal("Internal error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DriveError::Database(e) => {
                tracing::error!(error = %e, "Drive database error");
            }
            DriveError::Internal(msg) => {
                tracing::error!(message = %msg, "Drive internal error");
            }
            DriveError::NoMappingAvailable => {
                tracing::warn!("No domain mapping and no default mapping configured");
            }
            _ => {
                tracing::debug!(error = %self, "Drive error");
            }
        }
    }
}

impl IntoResponse for DriveError {
    fn into_response(self) -> Response {
        match self {
            DriveError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

impl From<AppError> for DriveError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => DriveError::Validation(err.message().to_string()),
            _ => DriveError::Internal(err.to_string()),
        }
    }
}
