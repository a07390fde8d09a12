//! In-Memory Repository Implementation
//!
//! Used when no database is configured and by the test suite. Ids are
//! monotonic from 1 and never reused; each operation holds the lock for
//! its whole read-check-write.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

/// In-memory user repository; clones share state
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        inner.last_id += 1;
        let user = user.into_user(UserId::from_raw(inner.last_id));
        inner.users.insert(user.id.get(), user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id.get()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn touch_last_login(&self, id: UserId, at: i64) -> AuthResult<()> {
        if let Some(user) = self.inner.write().await.users.get_mut(&id.get()) {
            user.last_login = at;
        }
        Ok(())
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> AuthResult<u64> {
        let mut inner = self.inner.write().await;

        if let Some(email) = &changes.email
            && inner
                .users
                .values()
                .any(|u| &u.email == email && u.id != id)
        {
            return Err(AuthError::EmailConflict);
        }

        match inner.users.get_mut(&id.get()) {
            Some(user) => {
                changes.apply_to(user);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: UserId) -> AuthResult<u64> {
        Ok(self
            .inner
            .write()
            .await
            .users
            .remove(&id.get())
            .map_or(0, |_| 1))
    }

    async fn set_role_by_email(&self, email: &Email, role: UserRole) -> AuthResult<u64> {
        let mut inner = self.inner.write().await;
        match inner.users.values_mut().find(|u| &u.email == email) {
            Some(user) => {
                user.role = role;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashedPassword;

    fn new_user(email: &str) -> NewUser {
        NewUser::new(
            "Test".into(),
            Email::new(email).unwrap(),
            HashedPassword::from_stored("$argon2id$stub"),
            UserRole::User,
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_from_one() {
        let repo = MemoryUserRepository::new();
        let a = repo.create(new_user("a@example.com")).await.unwrap();
        let b = repo.create(new_user("b@example.com")).await.unwrap();
        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);

        repo.delete(b.id).await.unwrap();
        let c = repo.create(new_user("c@example.com")).await.unwrap();
        assert_eq!(c.id.get(), 3);
    }

    #[tokio::test]
    async fn test_email_unique_case_sensitive() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();
        assert!(matches!(
            repo.create(new_user("a@example.com")).await,
            Err(AuthError::EmailAlreadyExists)
        ));
        assert!(repo.create(new_user("A@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let repo = MemoryUserRepository::new();
        let a = repo.create(new_user("a@example.com")).await.unwrap();
        repo.create(new_user("b@example.com")).await.unwrap();

        let changes = UserChanges {
            email: Some(Email::new("b@example.com").unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(a.id, &changes).await,
            Err(AuthError::EmailConflict)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_affects_nothing() {
        let repo = MemoryUserRepository::new();
        let changes = UserChanges {
            name: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(repo.update(UserId::from_raw(9), &changes).await.unwrap(), 0);
        assert_eq!(repo.delete(UserId::from_raw(9)).await.unwrap(), 0);
    }
}
