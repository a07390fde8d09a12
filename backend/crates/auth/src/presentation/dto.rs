//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub department: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Minimal user identity returned by login and role changes
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
        }
    }
}

/// Message plus user summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub message: String,
    pub user: UserSummary,
}

// ============================================================================
// Profile
// ============================================================================

/// Full user record as shown to its owner and to admins.
///
/// Built field by field; the password hash has no counterpart here.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub created_at: i64,
    pub last_login: i64,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
            department: user.department.clone(),
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// Message plus full user record
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

/// Profile update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub role: Option<String>,
}

// ============================================================================
// Admin
// ============================================================================

/// Admin create-user request
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Admin update-user request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Admin role change request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub email: String,
    pub role: String,
}

// ============================================================================
// Common
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
