//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::access_log::{AccessLog, NewAccessLog};
pub use entity::default_mapping::DefaultMapping;
pub use entity::domain_mapping::{DomainMapping, MappingChanges, NewDomainMapping};
pub use repository::{AccessLogRepository, DriveStore, MappingRepository};
pub use value_object::domain_name::{DomainName, normalize_domain};
pub use value_object::mapping_id::{AccessLogId, DEFAULT_MAPPING_ID, MappingId};
