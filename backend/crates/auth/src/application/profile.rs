//! Update Profile Use Case
//!
//! Self-service edits. A role change is honored only when the caller's
//! stored role is already `admin`; anyone else gets `ForbiddenRoleChange`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::hash_new_password;
use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Profile update input. Empty strings count as "not provided".
#[derive(Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub role: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, caller: User, input: UpdateProfileInput) -> AuthResult<User> {
        let mut changes = UserChanges {
            name: non_empty(input.name),
            department: non_empty(input.department),
            ..Default::default()
        };

        if let Some(code) = non_empty(input.role) {
            let role = code
                .parse::<UserRole>()
                .map_err(|e| AuthError::Validation(e.to_string()))?;
            if role != caller.role {
                if !caller.is_admin() {
                    return Err(AuthError::ForbiddenRoleChange);
                }
                changes.role = Some(role);
            }
        }

        // Passwords are taken verbatim, never trimmed
        if let Some(password) = input.password.filter(|p| !p.is_empty()) {
            if input.password_confirm.as_deref() != Some(password.as_str()) {
                return Err(AuthError::PasswordMismatch);
            }
            changes.password_hash =
                Some(hash_new_password(password, self.config.password_pepper.clone()).await?);
        }

        if changes.is_empty() {
            return Ok(caller);
        }

        if self.repo.update(caller.id, &changes).await? == 0 {
            return Err(AuthError::UserNotFound);
        }

        if let Some(role) = changes.role {
            tracing::info!(user_id = %caller.id, role = %role, "Role changed via profile");
        }
        tracing::info!(user_id = %caller.id, "Profile updated");

        let mut updated = caller;
        changes.apply_to(&mut updated);
        Ok(updated)
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
