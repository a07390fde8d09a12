//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::Resolution;
use crate::domain::entity::default_mapping::DefaultMapping;
use crate::domain::entity::domain_mapping::DomainMapping;
use crate::domain::value_object::mapping_id::DEFAULT_MAPPING_ID;

/// GET /api/user/drive response
#[derive(Debug, Clone, Serialize)]
pub struct DriveResponse {
    pub drive_url: String,
    pub domain: String,
    pub is_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Resolution> for DriveResponse {
    fn from(r: Resolution) -> Self {
        Self {
            drive_url: r.drive_url,
            domain: r.domain,
            is_default: r.is_default,
            description: r.description,
        }
    }
}

/// Create mapping request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMappingRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub drive_url: String,
    #[serde(default)]
    pub description: String,
    pub is_active: Option<bool>,
}

/// Update mapping request; omitted or empty fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMappingRequest {
    pub domain: Option<String>,
    pub drive_url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Default mapping upsert request
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultMappingRequest {
    #[serde(default)]
    pub drive_url: String,
}

/// Domain mapping as shown to admins
#[derive(Debug, Clone, Serialize)]
pub struct MappingResponse {
    pub id: i64,
    pub domain: String,
    pub drive_url: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by: i64,
}

impl From<&DomainMapping> for MappingResponse {
    fn from(m: &DomainMapping) -> Self {
        Self {
            id: m.id.get(),
            domain: m.domain.as_str().to_string(),
            drive_url: m.drive_url.clone(),
            description: m.description.clone(),
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by.get(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultMappingResponse {
    pub id: i64,
    pub drive_url: String,
    pub updated_at: i64,
    pub updated_by: Option<i64>,
}

impl From<&DefaultMapping> for DefaultMappingResponse {
    fn from(m: &DefaultMapping) -> Self {
        Self {
            id: DEFAULT_MAPPING_ID,
            drive_url: m.drive_url.clone(),
            updated_at: m.updated_at,
            updated_by: m.updated_by.map(|id| id.get()),
        }
    }
}
