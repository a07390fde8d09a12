//! In-Memory Repository Implementation
//!
//! Used when no database is configured and by the test suite.

use std::collections::BTreeMap;
use std::sync::Arc;

use auth::models::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::access_log::{AccessLog, NewAccessLog};
use crate::domain::entity::default_mapping::DefaultMapping;
use crate::domain::entity::domain_mapping::{DomainMapping, MappingChanges, NewDomainMapping};
use crate::domain::repository::{AccessLogRepository, MappingRepository};
use crate::domain::value_object::domain_name::DomainName;
use crate::domain::value_object::mapping_id::{AccessLogId, MappingId};
use crate::error::DriveResult;

#[derive(Default)]
struct Inner {
    mappings: BTreeMap<i64, DomainMapping>,
    last_mapping_id: i64,
    default_mapping: Option<DefaultMapping>,
    access_logs: Vec<AccessLog>,
}

/// In-memory drive repository; clones share state
#[derive(Clone, Default)]
pub struct MemoryDriveRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryDriveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingRepository for MemoryDriveRepository {
    async fn list(&self) -> DriveResult<Vec<DomainMapping>> {
        Ok(self.inner.read().await.mappings.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MappingId) -> DriveResult<Option<DomainMapping>> {
        Ok(self.inner.read().await.mappings.get(&id.get()).cloned())
    }

    async fn find_active_by_domain(&self, domain: &DomainName) -> DriveResult<Option<DomainMapping>> {
        Ok(self
            .inner
            .read()
            .await
            .mappings
            .values()
            .find(|m| m.is_active && &m.domain == domain)
            .cloned())
    }

    async fn create(&self, mapping: NewDomainMapping) -> DriveResult<DomainMapping> {
        let mut inner = self.inner.write().await;
        inner.last_mapping_id += 1;
        let mapping = mapping.into_mapping(MappingId::from_raw(inner.last_mapping_id));
        inner.mappings.insert(mapping.id.get(), mapping.clone());
        Ok(mapping)
    }

    async fn update(&self, id: MappingId, changes: &MappingChanges, at: i64) -> DriveResult<u64> {
        match self.inner.write().await.mappings.get_mut(&id.get()) {
            Some(mapping) => {
                changes.apply_to(mapping, at);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: MappingId) -> DriveResult<u64> {
        Ok(self
            .inner
            .write()
            .await
            .mappings
            .remove(&id.get())
            .map_or(0, |_| 1))
    }

    async fn get_default(&self) -> DriveResult<Option<DefaultMapping>> {
        Ok(self.inner.read().await.default_mapping.clone())
    }

    async fn upsert_default(
        &self,
        drive_url: &str,
        updated_by: Option<UserId>,
        at: i64,
    ) -> DriveResult<DefaultMapping> {
        let mapping = DefaultMapping {
            drive_url: drive_url.to_string(),
            updated_at: at,
            updated_by,
        };
        self.inner.write().await.default_mapping = Some(mapping.clone());
        Ok(mapping)
    }

    async fn seed_default(&self, drive_url: &str, at: i64) -> DriveResult<DefaultMapping> {
        let mut inner = self.inner.write().await;
        let mapping = inner.default_mapping.get_or_insert_with(|| DefaultMapping {
            drive_url: drive_url.to_string(),
            updated_at: at,
            updated_by: None,
        });
        Ok(mapping.clone())
    }
}

impl AccessLogRepository for MemoryDriveRepository {
    async fn append(&self, entry: NewAccessLog) -> DriveResult<AccessLog> {
        let mut inner = self.inner.write().await;
        let id = AccessLogId::from_raw(inner.access_logs.len() as i64 + 1);
        let log = entry.into_log(id);
        inner.access_logs.push(log.clone());
        Ok(log)
    }

    async fn list_for_user(&self, user_id: UserId) -> DriveResult<Vec<AccessLog>> {
        Ok(self
            .inner
            .read()
            .await
            .access_logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_mapping(domain: &str, active: bool) -> NewDomainMapping {
        NewDomainMapping::new(
            DomainName::parse(domain).unwrap(),
            format!("https://drive.example/{domain}"),
            String::new(),
            active,
            UserId::from_raw(1),
        )
    }

    #[tokio::test]
    async fn test_active_lookup_takes_lowest_id() {
        let repo = MemoryDriveRepository::new();
        repo.create(new_mapping("a.com", false)).await.unwrap();
        let first = repo.create(new_mapping("a.com", true)).await.unwrap();
        repo.create(new_mapping("a.com", true)).await.unwrap();

        let domain = DomainName::parse("a.com").unwrap();
        let found = repo.find_active_by_domain(&domain).await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_default() {
        let repo = MemoryDriveRepository::new();
        repo.upsert_default("https://admin-set", Some(UserId::from_raw(2)), 10)
            .await
            .unwrap();

        let seeded = repo.seed_default("https://seed", 20).await.unwrap();
        assert_eq!(seeded.drive_url, "https://admin-set");
        assert_eq!(seeded.updated_by, Some(UserId::from_raw(2)));
    }

    #[tokio::test]
    async fn test_delete_missing_affects_nothing() {
        let repo = MemoryDriveRepository::new();
        assert_eq!(repo.delete(MappingId::from_raw(5)).await.unwrap(), 0);
        let changes = MappingChanges {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(repo.update(MappingId::from_raw(5), &changes, 1).await.unwrap(), 0);
    }
}
