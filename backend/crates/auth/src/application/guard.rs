//! Authorization Guard
//!
//! Derives the caller's identity from a presented token and the credential
//! store. Every failure path is fail-closed: a broken token is anonymous,
//! and an admin check that cannot be completed is a refusal.

use std::sync::Arc;

use platform::token::TokenService;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Caller identity derived from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(UserId),
}

/// Authorization guard
pub struct AuthGuard<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthGuard<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Identity carried by `token`; any verification failure is anonymous
    pub fn current_identity(&self, token: Option<&str>) -> Identity {
        let Some(token) = token else {
            return Identity::Anonymous;
        };

        match self.tokens.verify(token) {
            Ok(claims) => UserId::from_subject(claims.subject)
                .map(Identity::User)
                .unwrap_or(Identity::Anonymous),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                Identity::Anonymous
            }
        }
    }

    /// Load the caller or fail with `Unauthenticated` / `UserNotFound`
    pub async fn require_user(&self, token: Option<&str>) -> AuthResult<User> {
        let Identity::User(id) = self.current_identity(token) else {
            return Err(AuthError::Unauthenticated);
        };
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Whether the caller is an admin. Never fails.
    pub async fn is_admin(&self, token: Option<&str>) -> bool {
        self.admin_caller(token).await.is_some()
    }

    /// Load the calling admin or refuse with `AdminRequired`
    pub async fn require_admin(&self, token: Option<&str>) -> AuthResult<User> {
        self.admin_caller(token).await.ok_or(AuthError::AdminRequired)
    }

    async fn admin_caller(&self, token: Option<&str>) -> Option<User> {
        let Identity::User(id) = self.current_identity(token) else {
            return None;
        };

        match self.repo.find_by_id(id).await {
            Ok(Some(user)) if user.is_admin() => Some(user),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, user_id = %id, "Admin check failed, refusing");
                None
            }
        }
    }
}
