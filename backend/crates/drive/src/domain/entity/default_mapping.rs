//! Default Mapping Entity
//!
//! Fallback folder for users whose domain has no active mapping. There is
//! at most one record, stored under
//! [`DEFAULT_MAPPING_ID`](crate::domain::value_object::mapping_id::DEFAULT_MAPPING_ID).

use auth::models::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultMapping {
    pub drive_url: String,
    /// Unix seconds
    pub updated_at: i64,
    /// `None` when written by the startup seed
    pub updated_by: Option<UserId>,
}
