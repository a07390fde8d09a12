//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AdminCreateInput, AdminUpdateInput, AdminUsersUseCase, AuthGuard, LoginInput, LoginUseCase,
    RegisterInput, RegisterUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AdminCreateUserRequest, AdminUpdateUserRequest, LoginRequest, MessageResponse,
    RegisterRequest, SummaryResponse, UpdateProfileRequest, UpdateRoleRequest, UserEnvelope,
    UserResponse, UserSummary,
};
use crate::presentation::middleware::AdminUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
    pub guard: Arc<AuthGuard<R>>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Build the state; the token service is created once here
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let repo = Arc::new(repo);
        let tokens = Arc::new(config.token_service());
        let guard = Arc::new(AuthGuard::new(repo.clone(), tokens.clone()));
        Self {
            repo,
            config: Arc::new(config),
            tokens,
            guard,
        }
    }
}

// ============================================================================
// Register / Login / Logout
// ============================================================================

/// POST /api/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            department: req.department,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SummaryResponse {
            message: "User registered successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.token.token, state.config.token_ttl_secs());

    Ok((
        StatusCode::ACCEPTED,
        [(header::SET_COOKIE, cookie)],
        Json(SummaryResponse {
            message: "Login successful".to_string(),
            user: UserSummary::from(&output.user),
        }),
    ))
}

/// POST /api/logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.cookie_config().build_delete_cookie();

    (
        StatusCode::ACCEPTED,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Logout successful")),
    )
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/user
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = session_token(&headers, &state.config);
    let user = state.guard.require_user(token.as_deref()).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/user/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = session_token(&headers, &state.config);
    let caller = state.guard.require_user(token.as_deref()).await?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(
            caller,
            UpdateProfileInput {
                name: req.name,
                department: req.department,
                password: req.password,
                password_confirm: req.password_confirm,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(UserEnvelope {
        message: "Profile updated successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// Admin (behind `require_admin`)
// ============================================================================

/// GET /api/admin/users
pub async fn admin_list_users<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let users = admin_use_case(&state).list(&admin).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/admin/users/{id}
pub async fn admin_get_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<i64>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = admin_use_case(&state)
        .get(&admin, UserId::from_raw(id))
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/admin/users
pub async fn admin_create_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Json(req): Json<AdminCreateUserRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = admin_use_case(&state)
        .create(
            &admin,
            AdminCreateInput {
                name: req.name,
                email: req.email,
                password: req.password,
                department: req.department,
                role: req.role,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// PUT /api/admin/users/{id}
pub async fn admin_update_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<i64>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = admin_use_case(&state)
        .update(
            &admin,
            UserId::from_raw(id),
            AdminUpdateInput {
                name: req.name,
                email: req.email,
                password: req.password,
                role: req.role,
                department: req.department,
            },
        )
        .await?;

    Ok(Json(UserEnvelope {
        message: "User updated successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

/// DELETE /api/admin/users/{id}
pub async fn admin_delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<i64>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    admin_use_case(&state)
        .delete(&admin, UserId::from_raw(id))
        .await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// POST /api/admin/update-role
pub async fn admin_update_role<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Json(req): Json<UpdateRoleRequest>,
) -> AuthResult<Json<SummaryResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = admin_use_case(&state)
        .set_role(&admin, &req.email, &req.role)
        .await?;

    Ok(Json(SummaryResponse {
        message: "User role updated successfully".to_string(),
        user: UserSummary::from(&user),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Session token presented in the request cookie, if any
pub fn session_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    platform::cookie::extract_cookie(headers, &config.token_cookie_name)
}

fn admin_use_case<R>(state: &AuthAppState<R>) -> AdminUsersUseCase<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    AdminUsersUseCase::new(state.repo.clone(), state.config.clone())
}
