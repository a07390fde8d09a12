//! Startup admin promotion
//!
//! Promotes an existing account to `admin` so a fresh deployment has
//! someone able to reach the admin surface.

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::AuthResult;

/// Promote the user with `email` to admin. Returns whether a user matched.
pub async fn promote_admin<R>(repo: &R, email: &str) -> AuthResult<bool>
where
    R: UserRepository,
{
    let email = Email::new(email)?;
    let affected = repo.set_role_by_email(&email, UserRole::Admin).await?;

    if affected == 0 {
        tracing::warn!(email = %email, "Bootstrap admin not found, nothing promoted");
        return Ok(false);
    }

    tracing::info!(email = %email, "Bootstrap admin promoted");
    Ok(true)
}
