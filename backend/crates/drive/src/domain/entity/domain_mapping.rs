//! Domain Mapping Entity
//!
//! Routes users whose email domain equals `domain` to `drive_url`.

use auth::models::UserId;
use chrono::Utc;

use crate::domain::value_object::{domain_name::DomainName, mapping_id::MappingId};

/// Domain mapping entity.
///
/// Domains are expected to be unique among active mappings but this is not
/// enforced; resolution takes the lowest id.
#[derive(Debug, Clone)]
pub struct DomainMapping {
    pub id: MappingId,
    pub domain: DomainName,
    pub drive_url: String,
    pub description: String,
    pub is_active: bool,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub updated_at: i64,
    pub created_by: UserId,
}

/// A mapping not yet persisted
#[derive(Debug, Clone)]
pub struct NewDomainMapping {
    pub domain: DomainName,
    pub drive_url: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by: UserId,
}

impl NewDomainMapping {
    pub fn new(
        domain: DomainName,
        drive_url: String,
        description: String,
        is_active: bool,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            domain,
            drive_url,
            description,
            is_active,
            created_at: now,
            updated_at: now,
            created_by,
        }
    }

    pub fn into_mapping(self, id: MappingId) -> DomainMapping {
        DomainMapping {
            id,
            domain: self.domain,
            drive_url: self.drive_url,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by: self.created_by,
        }
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct MappingChanges {
    pub domain: Option<DomainName>,
    pub drive_url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl MappingChanges {
    pub fn is_empty(&self) -> bool {
        self.domain.is_none()
            && self.drive_url.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }

    /// Apply onto an in-memory copy, stamping `updated_at`
    pub fn apply_to(&self, mapping: &mut DomainMapping, updated_at: i64) {
        if let Some(domain) = &self.domain {
            mapping.domain = domain.clone();
        }
        if let Some(url) = &self.drive_url {
            mapping.drive_url = url.clone();
        }
        if let Some(description) = &self.description {
            mapping.description = description.clone();
        }
        if let Some(active) = self.is_active {
            mapping.is_active = active;
        }
        mapping.updated_at = updated_at;
    }
}
