//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_admin;

/// Create the accounts router for any repository implementation.
///
/// Paths are relative to the `/api` prefix the binary nests them under.
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let admin = Router::new()
        .route(
            "/admin/users",
            get(handlers::admin_list_users::<R>).post(handlers::admin_create_user::<R>),
        )
        .route(
            "/admin/users/{id}",
            get(handlers::admin_get_user::<R>)
                .put(handlers::admin_update_user::<R>)
                .delete(handlers::admin_delete_user::<R>),
        )
        .route("/admin/update-role", post(handlers::admin_update_role::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/user", get(handlers::current_user::<R>))
        .route("/user/profile", put(handlers::update_profile::<R>))
        .merge(admin)
        .with_state(state)
}
