//! Auth Middleware
//!
//! Route layer that admits only admins. The admin caller is placed in the
//! request extensions for downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::{AuthAppState, session_token};

/// The authorized admin, inserted by [`require_admin`]
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Middleware that refuses non-admin callers with `AdminRequired`
pub async fn require_admin<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = session_token(req.headers(), &state.config);
    let admin = state.guard.require_admin(token.as_deref()).await?;

    req.extensions_mut().insert(AdminUser(admin));

    Ok(next.run(req).await)
}
