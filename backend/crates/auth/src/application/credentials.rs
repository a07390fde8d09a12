//! Password hashing off the async runtime
//!
//! Argon2 is CPU-bound; both operations run on the blocking pool.

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

/// Apply the password policy and hash a new password
pub async fn hash_new_password(raw: String, pepper: Option<Vec<u8>>) -> AuthResult<HashedPassword> {
    let password =
        ClearTextPassword::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;

    tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
        .map_err(AuthError::from)
}

/// Verify a presented password against a stored hash
pub async fn verify_password(
    raw: String,
    stored: HashedPassword,
    pepper: Option<Vec<u8>>,
) -> AuthResult<bool> {
    let password = ClearTextPassword::for_verification(raw);

    tokio::task::spawn_blocking(move || stored.verify(&password, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))?
        .map_err(AuthError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_new_password("correct horse battery".into(), None)
            .await
            .unwrap();
        assert!(verify_password("correct horse battery".into(), hash.clone(), None)
            .await
            .unwrap());
        assert!(!verify_password("wrong".into(), hash, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_policy_violation_is_validation_error() {
        let result = hash_new_password("short".into(), None).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_malformed_stored_hash() {
        let result =
            verify_password("anything".into(), HashedPassword::from_stored("bogus"), None).await;
        assert!(matches!(result, Err(AuthError::MalformedHash)));
    }
}
