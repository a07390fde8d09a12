//! Mapping administration
//!
//! CRUD over domain mappings and the default mapping. Callers are admins
//! already admitted by the route layer; `actor` is recorded as author.

use std::sync::Arc;

use auth::models::User;
use chrono::Utc;

use crate::domain::entity::default_mapping::DefaultMapping;
use crate::domain::entity::domain_mapping::{DomainMapping, MappingChanges, NewDomainMapping};
use crate::domain::repository::DriveStore;
use crate::domain::value_object::{domain_name::DomainName, mapping_id::MappingId};
use crate::error::{DriveError, DriveResult};

/// Create mapping input
pub struct CreateMappingInput {
    pub domain: String,
    pub drive_url: String,
    pub description: String,
    pub is_active: Option<bool>,
}

/// Update mapping input; empty strings count as absent
#[derive(Default)]
pub struct UpdateMappingInput {
    pub domain: Option<String>,
    pub drive_url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct MappingAdminUseCase<D>
where
    D: DriveStore,
{
    store: Arc<D>,
}

impl<D> MappingAdminUseCase<D>
where
    D: DriveStore,
{
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn list(&self, _actor: &User) -> DriveResult<Vec<DomainMapping>> {
        self.store.list().await
    }

    pub async fn create(&self, actor: &User, input: CreateMappingInput) -> DriveResult<DomainMapping> {
        let drive_url = input.drive_url.trim();
        if input.domain.trim().is_empty() || drive_url.is_empty() {
            return Err(DriveError::Validation(
                "Domain and Drive URL are required".to_string(),
            ));
        }
        let domain = DomainName::parse(&input.domain)?;

        let mapping = self
            .store
            .create(NewDomainMapping::new(
                domain,
                drive_url.to_string(),
                input.description.trim().to_string(),
                input.is_active.unwrap_or(true),
                actor.id,
            ))
            .await?;

        tracing::info!(
            mapping_id = %mapping.id,
            domain = %mapping.domain,
            admin_id = %actor.id,
            "Domain mapping created"
        );
        Ok(mapping)
    }

    pub async fn update(
        &self,
        actor: &User,
        id: MappingId,
        input: UpdateMappingInput,
    ) -> DriveResult<DomainMapping> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(DriveError::MappingNotFound);
        }

        let changes = MappingChanges {
            domain: non_empty(input.domain)
                .map(|d| DomainName::parse(&d))
                .transpose()?,
            drive_url: non_empty(input.drive_url),
            description: non_empty(input.description),
            is_active: input.is_active,
        };

        let affected = self
            .store
            .update(id, &changes, Utc::now().timestamp())
            .await?;
        if affected == 0 {
            return Err(DriveError::MappingNotFound);
        }

        let mapping = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DriveError::MappingNotFound)?;

        tracing::info!(
            mapping_id = %id,
            domain = %mapping.domain,
            admin_id = %actor.id,
            "Domain mapping updated"
        );
        Ok(mapping)
    }

    pub async fn delete(&self, actor: &User, id: MappingId) -> DriveResult<()> {
        if self.store.delete(id).await? == 0 {
            return Err(DriveError::MappingNotFound);
        }

        tracing::info!(mapping_id = %id, admin_id = %actor.id, "Domain mapping deleted");
        Ok(())
    }

    pub async fn default_mapping(&self, _actor: &User) -> DriveResult<DefaultMapping> {
        self.store
            .get_default()
            .await?
            .ok_or(DriveError::NoMappingAvailable)
    }

    pub async fn set_default(&self, actor: &User, drive_url: &str) -> DriveResult<DefaultMapping> {
        let drive_url = drive_url.trim();
        if drive_url.is_empty() {
            return Err(DriveError::Validation("Drive URL is required".to_string()));
        }

        let mapping = self
            .store
            .upsert_default(drive_url, Some(actor.id), Utc::now().timestamp())
            .await?;

        tracing::info!(admin_id = %actor.id, "Default mapping updated");
        Ok(mapping)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
