//! User Entity
//!
//! Account record owned by the credential store.

use chrono::Utc;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};

/// User entity
///
/// `password_hash` never leaves the crate boundary in responses; DTOs
/// are built field by field.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier (monotonic, starts at 1)
    pub id: UserId,
    pub name: String,
    /// Unique, compared case-sensitively
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub department: String,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub last_login: i64,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A user not yet persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub department: String,
    pub created_at: i64,
    pub last_login: i64,
}

impl NewUser {
    /// Stamp `created_at` and `last_login` with the current time
    pub fn new(
        name: String,
        email: Email,
        password_hash: HashedPassword,
        role: UserRole,
        department: String,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            name,
            email,
            password_hash,
            role,
            department,
            created_at: now,
            last_login: now,
        }
    }

    /// Attach a store-assigned id
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            department: self.department,
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<HashedPassword>,
    pub role: Option<UserRole>,
    pub department: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
            && self.department.is_none()
    }

    /// Apply onto an in-memory copy
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(department) = &self.department {
            user.department = department.clone();
        }
    }
}
