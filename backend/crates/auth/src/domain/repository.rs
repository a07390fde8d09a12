//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return it with its assigned id.
    ///
    /// Fails with `EmailAlreadyExists` if the email is taken.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// All users ordered by id
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Record a successful login
    async fn touch_last_login(&self, id: UserId, at: i64) -> AuthResult<()>;

    /// Apply a partial update, returning the number of affected records.
    ///
    /// Fails with `EmailConflict` if the new email belongs to another user.
    async fn update(&self, id: UserId, changes: &UserChanges) -> AuthResult<u64>;

    /// Delete by id, returning the number of affected records
    async fn delete(&self, id: UserId) -> AuthResult<u64>;

    /// Set the role of the user with this email, returning affected records
    async fn set_role_by_email(&self, email: &Email, role: UserRole) -> AuthResult<u64>;
}
