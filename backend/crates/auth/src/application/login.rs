//! Login Use Case
//!
//! Verifies credentials and issues a signed session token.

use std::sync::Arc;

use chrono::Utc;
use platform::token::{IssuedToken, TokenService};

use crate::application::config::AuthConfig;
use crate::application::credentials::verify_password;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: IssuedToken,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Unknown email and wrong password must be indistinguishable
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = verify_password(
            input.password,
            user.password_hash.clone(),
            self.config.password_pepper.clone(),
        )
        .await?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        self.repo.touch_last_login(user.id, now).await?;
        user.last_login = now;

        let token = self
            .tokens
            .issue(user.id.as_subject())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
