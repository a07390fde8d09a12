//! Admin User Management Use Cases
//!
//! Every operation takes the already-authorized admin as `actor`; callers
//! obtain it from `AuthGuard::require_admin` before reaching the store.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::hash_new_password;
use crate::application::profile::non_empty;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Admin update input. Empty strings count as "not provided".
#[derive(Default)]
pub struct AdminUpdateInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Admin create input
pub struct AdminCreateInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    /// Defaults to `admin` when absent
    pub role: Option<String>,
}

/// Admin user management use case
pub struct AdminUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AdminUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self, _actor: &User) -> AuthResult<Vec<User>> {
        self.repo.list().await
    }

    pub async fn get(&self, _actor: &User, id: UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn create(&self, actor: &User, input: AdminCreateInput) -> AuthResult<User> {
        let role = match non_empty(input.role) {
            Some(code) => parse_role(&code)?,
            None => UserRole::Admin,
        };

        let register = RegisterUseCase::new(self.repo.clone(), self.config.clone());
        let user = register
            .create_with_role(
                RegisterInput {
                    name: input.name,
                    email: input.email,
                    password: input.password,
                    department: input.department,
                },
                role,
            )
            .await?;

        tracing::info!(actor_id = %actor.id, user_id = %user.id, role = %user.role, "User created by admin");
        Ok(user)
    }

    pub async fn update(
        &self,
        actor: &User,
        id: UserId,
        input: AdminUpdateInput,
    ) -> AuthResult<User> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let mut changes = UserChanges {
            name: non_empty(input.name),
            department: non_empty(input.department),
            ..Default::default()
        };

        if let Some(raw) = non_empty(input.email) {
            let email = Email::new(raw)?;
            if let Some(other) = self.repo.find_by_email(&email).await?
                && other.id != id
            {
                return Err(AuthError::EmailConflict);
            }
            changes.email = Some(email);
        }

        if let Some(code) = non_empty(input.role) {
            changes.role = Some(parse_role(&code)?);
        }

        if let Some(password) = input.password.filter(|p| !p.is_empty()) {
            changes.password_hash =
                Some(hash_new_password(password, self.config.password_pepper.clone()).await?);
        }

        if changes.is_empty() {
            return Err(AuthError::NoChangesApplied);
        }

        if self.repo.update(id, &changes).await? == 0 {
            return Err(AuthError::NoChangesApplied);
        }

        changes.apply_to(&mut user);
        tracing::info!(actor_id = %actor.id, user_id = %id, "User updated by admin");
        Ok(user)
    }

    pub async fn delete(&self, actor: &User, id: UserId) -> AuthResult<()> {
        if actor.id == id {
            return Err(AuthError::SelfDeleteForbidden);
        }

        if self.repo.delete(id).await? == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(actor_id = %actor.id, user_id = %id, "User deleted by admin");
        Ok(())
    }

    pub async fn set_role(&self, actor: &User, email: &str, role: &str) -> AuthResult<User> {
        let role = parse_role(role)?;
        let email = Email::new(email)?;

        if self.repo.set_role_by_email(&email, role).await? == 0 {
            return Err(AuthError::UserNotFound);
        }

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(actor_id = %actor.id, user_id = %user.id, role = %role, "Role updated");
        Ok(user)
    }
}

fn parse_role(code: &str) -> AuthResult<UserRole> {
    code.parse::<UserRole>()
        .map_err(|e| AuthError::Validation(e.to_string()))
}
