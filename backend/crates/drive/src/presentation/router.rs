//! Drive Router

use auth::domain::repository::UserRepository;
use auth::require_admin;
use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::domain::repository::DriveStore;
use crate::presentation::handlers::{self, DriveAppState};

/// Create the drive router.
///
/// Admin routes are gated by the accounts context's `require_admin` layer.
/// Paths are relative to the `/api` prefix.
pub fn drive_router<D, R>(state: DriveAppState<D, R>) -> Router
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let admin = Router::new()
        .route(
            "/admin/domains",
            get(handlers::list_mappings::<D, R>).post(handlers::create_mapping::<D, R>),
        )
        .route(
            "/admin/domains/{id}",
            put(handlers::update_mapping::<D, R>).delete(handlers::delete_mapping::<D, R>),
        )
        .route(
            "/admin/default-mapping",
            get(handlers::get_default_mapping::<D, R>).put(handlers::put_default_mapping::<D, R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_admin::<R>,
        ));

    Router::new()
        .route("/user/drive", get(handlers::resolve_drive::<D, R>))
        .merge(admin)
        .with_state(state)
}
