//! Repository Traits
//!
//! Interfaces for mapping and audit persistence. Implementations are in the
//! infra layer.

use auth::models::UserId;

use crate::domain::entity::access_log::{AccessLog, NewAccessLog};
use crate::domain::entity::default_mapping::DefaultMapping;
use crate::domain::entity::domain_mapping::{DomainMapping, MappingChanges, NewDomainMapping};
use crate::domain::value_object::{domain_name::DomainName, mapping_id::MappingId};
use crate::error::DriveResult;

/// Domain and default mapping repository
#[trait_variant::make(MappingRepository: Send)]
pub trait LocalMappingRepository {
    /// All mappings ordered by id, active or not
    async fn list(&self) -> DriveResult<Vec<DomainMapping>>;

    async fn find_by_id(&self, id: MappingId) -> DriveResult<Option<DomainMapping>>;

    /// Lowest-id active mapping for `domain`
    async fn find_active_by_domain(&self, domain: &DomainName) -> DriveResult<Option<DomainMapping>>;

    /// Insert a mapping and return it with its assigned id
    async fn create(&self, mapping: NewDomainMapping) -> DriveResult<DomainMapping>;

    /// Apply a partial update, returning the number of affected records
    async fn update(&self, id: MappingId, changes: &MappingChanges, at: i64) -> DriveResult<u64>;

    /// Delete by id, returning the number of affected records
    async fn delete(&self, id: MappingId) -> DriveResult<u64>;

    async fn get_default(&self) -> DriveResult<Option<DefaultMapping>>;

    /// Create or replace the default mapping in one atomic step
    async fn upsert_default(
        &self,
        drive_url: &str,
        updated_by: Option<UserId>,
        at: i64,
    ) -> DriveResult<DefaultMapping>;

    /// Create the default mapping only if none exists; returns the stored one
    async fn seed_default(&self, drive_url: &str, at: i64) -> DriveResult<DefaultMapping>;
}

/// Append-only access log
#[trait_variant::make(AccessLogRepository: Send)]
pub trait LocalAccessLogRepository {
    async fn append(&self, entry: NewAccessLog) -> DriveResult<AccessLog>;

    /// Entries for one user, oldest first
    async fn list_for_user(&self, user_id: UserId) -> DriveResult<Vec<AccessLog>>;
}

/// Everything the drive context needs from a storage backend
pub trait DriveStore: MappingRepository + AccessLogRepository + Clone + Send + Sync + 'static {}

impl<T> DriveStore for T where T: MappingRepository + AccessLogRepository + Clone + Send + Sync + 'static {}
