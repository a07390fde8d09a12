//! PostgreSQL Repository Implementation

use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use platform::password::HashedPassword;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, department, created_at, last_login";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                name,
                email,
                password_hash,
                role,
                department,
                created_at,
                last_login
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(&user.department)
        .bind(user.created_at)
        .bind(user.last_login)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailAlreadyExists
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(user.into_user(UserId::from_raw(id)))
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn touch_last_login(&self, id: UserId, at: i64) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id.get())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> AuthResult<u64> {
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                department = COALESCE($6, department)
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(changes.name.as_deref())
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.password_hash.as_ref().map(HashedPassword::as_phc_string))
        .bind(changes.role.map(|r| r.code()))
        .bind(changes.department.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailConflict
            } else {
                AuthError::Database(e)
            }
        })?
        .rows_affected();

        Ok(affected)
    }

    async fn delete(&self, id: UserId) -> AuthResult<u64> {
        let affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected)
    }

    async fn set_role_by_email(&self, email: &Email, role: UserRole) -> AuthResult<u64> {
        let affected = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
            .bind(email.as_str())
            .bind(role.code())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    department: String,
    created_at: i64,
    last_login: i64,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|e| AuthError::Internal(format!("Invalid role in row {}: {}", self.id, e)))?;

        Ok(User {
            id: UserId::from_raw(self.id),
            name: self.name,
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_stored(self.password_hash),
            role,
            department: self.department,
            created_at: self.created_at,
            last_login: self.last_login,
        })
    }
}
