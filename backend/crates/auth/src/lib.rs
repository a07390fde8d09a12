//! Auth (Accounts) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases, authorization guard
//! - `infra/` - Postgres and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Signed 24h session token in an HTTP-only `jwt` cookie
//! - Role-based access (User, Admin), fail-closed
//! - Admin user management
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B length policy)
//! - Login never reveals whether the email exists
//! - Admin routes refuse before any use case runs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::guard::{AuthGuard, Identity};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryUserRepository, PgUserRepository};
pub use presentation::router::auth_router;
pub use presentation::{AdminUser, AuthAppState, require_admin, session_token};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
    pub use crate::presentation::dto::*;
}
