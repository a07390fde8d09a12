//! Register Use Case
//!
//! Creates accounts. Self-registration always yields role `user`; the
//! admin-create path reuses the same validation with an explicit role.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::hash_new_password;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Register a regular user
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        self.create_with_role(input, UserRole::User).await
    }

    /// Create a user with the given role
    pub async fn create_with_role(&self, input: RegisterInput, role: UserRole) -> AuthResult<User> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        let email = Email::new(input.email)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash =
            hash_new_password(input.password, self.config.password_pepper.clone()).await?;

        let new_user = NewUser::new(
            name,
            email,
            password_hash,
            role,
            input.department.trim().to_string(),
        );

        // The store re-checks uniqueness atomically
        let user = self.repo.create(new_user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }
}
