//! Domain Resolution Engine
//!
//! Picks the Drive folder for the calling user from their email domain and
//! records the access.

use std::sync::Arc;

use auth::AuthGuard;
use auth::domain::repository::UserRepository;
use auth::models::User;
use platform::client::ClientInfo;

use crate::domain::entity::access_log::NewAccessLog;
use crate::domain::repository::DriveStore;
use crate::domain::value_object::domain_name::DomainName;
use crate::error::{DriveError, DriveResult};

/// Folder chosen for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub drive_url: String,
    /// Domain part of the caller's email, lowercased
    pub domain: String,
    /// True when no active mapping matched and the default was used
    pub is_default: bool,
    /// Mapping description; absent for the default
    pub description: Option<String>,
}

pub struct ResolveDriveUseCase<D, R>
where
    D: DriveStore,
    R: UserRepository,
{
    store: Arc<D>,
    guard: Arc<AuthGuard<R>>,
}

impl<D, R> ResolveDriveUseCase<D, R>
where
    D: DriveStore,
    R: UserRepository,
{
    pub fn new(store: Arc<D>, guard: Arc<AuthGuard<R>>) -> Self {
        Self { store, guard }
    }

    /// Resolve for the holder of `token`
    pub async fn execute(&self, token: Option<&str>, client: ClientInfo) -> DriveResult<Resolution> {
        let user = self.guard.require_user(token).await?;
        self.resolve_for(&user, client).await
    }

    /// Resolve for an already loaded user
    pub async fn resolve_for(&self, user: &User, client: ClientInfo) -> DriveResult<Resolution> {
        let domain = user
            .email
            .routing_domain()
            .ok_or(DriveError::InvalidEmailDomain)?;
        let lookup = DomainName::from_db(domain.clone());

        let resolution = match self.store.find_active_by_domain(&lookup).await? {
            Some(mapping) => Resolution {
                drive_url: mapping.drive_url,
                domain,
                is_default: false,
                description: Some(mapping.description),
            },
            None => {
                let fallback = self
                    .store
                    .get_default()
                    .await?
                    .ok_or(DriveError::NoMappingAvailable)?;
                Resolution {
                    drive_url: fallback.drive_url,
                    domain,
                    is_default: true,
                    description: None,
                }
            }
        };

        let entry = NewAccessLog::now(
            user.id,
            resolution.domain.clone(),
            resolution.drive_url.clone(),
            client,
        );
        // Audit is best-effort
        if let Err(e) = self.store.append(entry).await {
            tracing::warn!(error = %e, user_id = %user.id, "Failed to record drive access");
        }

        tracing::info!(
            user_id = %user.id,
            domain = %resolution.domain,
            is_default = resolution.is_default,
            "Drive folder resolved"
        );

        Ok(resolution)
    }
}
