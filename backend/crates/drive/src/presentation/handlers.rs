//! HTTP Handlers

use std::net::SocketAddr;
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::models::MessageResponse;
use auth::{AdminUser, AuthAppState, session_token};
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{Extensions, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::application::{
    CreateMappingInput, MappingAdminUseCase, ResolveDriveUseCase, UpdateMappingInput,
};
use crate::domain::repository::DriveStore;
use crate::domain::value_object::mapping_id::MappingId;
use crate::error::DriveResult;
use crate::presentation::dto::{
    CreateMappingRequest, DefaultMappingRequest, DefaultMappingResponse, DriveResponse,
    MappingResponse, UpdateMappingRequest,
};

/// Shared state for drive handlers
#[derive(Clone)]
pub struct DriveAppState<D, R>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<D>,
    pub auth: AuthAppState<R>,
}

impl<D, R> DriveAppState<D, R>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(store: D, auth: AuthAppState<R>) -> Self {
        Self {
            store: Arc::new(store),
            auth,
        }
    }
}

fn admin_use_case<D, R>(state: &DriveAppState<D, R>) -> MappingAdminUseCase<D>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    MappingAdminUseCase::new(state.store.clone())
}

// ============================================================================
// Resolution
// ============================================================================

/// GET /api/user/drive
pub async fn resolve_drive<D, R>(
    State(state): State<DriveAppState<D, R>>,
    headers: HeaderMap,
    extensions: Extensions,
) -> DriveResult<Json<DriveResponse>>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = session_token(&headers, &state.auth.config);
    // Present only when served with connect info
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = platform::client::extract_client_info(&headers, peer);

    let resolution = ResolveDriveUseCase::new(state.store.clone(), state.auth.guard.clone())
        .execute(token.as_deref(), client)
        .await?;

    Ok(Json(DriveResponse::from(resolution)))
}

// ============================================================================
// Admin (behind `require_admin`)
// ============================================================================

/// GET /api/admin/domains
pub async fn list_mappings<D, R>(
    State(state): State<DriveAppState<D, R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
) -> DriveResult<Json<Vec<MappingResponse>>>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mappings = admin_use_case(&state).list(&admin).await?;
    Ok(Json(mappings.iter().map(MappingResponse::from).collect()))
}

/// POST /api/admin/domains
pub async fn create_mapping<D, R>(
    State(state): State<DriveAppState<D, R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Json(req): Json<CreateMappingRequest>,
) -> DriveResult<impl IntoResponse>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mapping = admin_use_case(&state)
        .create(
            &admin,
            CreateMappingInput {
                domain: req.domain,
                drive_url: req.drive_url,
                description: req.description,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MappingResponse::from(&mapping))))
}

/// PUT /api/admin/domains/{id}
pub async fn update_mapping<D, R>(
    State(state): State<DriveAppState<D, R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMappingRequest>,
) -> DriveResult<Json<MappingResponse>>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mapping = admin_use_case(&state)
        .update(
            &admin,
            MappingId::from_raw(id),
            UpdateMappingInput {
                domain: req.domain,
                drive_url: req.drive_url,
                description: req.description,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(MappingResponse::from(&mapping)))
}

/// DELETE /api/admin/domains/{id}
pub async fn delete_mapping<D, R>(
    State(state): State<DriveAppState<D, R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<i64>,
) -> DriveResult<Json<MessageResponse>>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    admin_use_case(&state)
        .delete(&admin, MappingId::from_raw(id))
        .await?;
    Ok(Json(MessageResponse::new("Domain mapping deleted successfully")))
}

/// GET /api/admin/default-mapping
pub async fn get_default_mapping<D, R>(
    State(state): State<DriveAppState<D, R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
) -> DriveResult<Json<DefaultMappingResponse>>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mapping = admin_use_case(&state).default_mapping(&admin).await?;
    Ok(Json(DefaultMappingResponse::from(&mapping)))
}

/// PUT /api/admin/default-mapping
pub async fn put_default_mapping<D, R>(
    State(state): State<DriveAppState<D, R>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Json(req): Json<DefaultMappingRequest>,
) -> DriveResult<Json<DefaultMappingResponse>>
where
    D: DriveStore,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mapping = admin_use_case(&state)
        .set_default(&admin, &req.drive_url)
        .await?;
    Ok(Json(DefaultMappingResponse::from(&mapping)))
}
