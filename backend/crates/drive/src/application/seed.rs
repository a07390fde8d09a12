//! Startup seed for the default mapping

use chrono::Utc;

use crate::domain::entity::default_mapping::DefaultMapping;
use crate::domain::repository::MappingRepository;
use crate::error::DriveResult;

/// Make sure a default mapping exists; an existing one is left as is
pub async fn ensure_default_mapping<D>(store: &D, seed_url: &str) -> DriveResult<DefaultMapping>
where
    D: MappingRepository,
{
    let mapping = store.seed_default(seed_url, Utc::now().timestamp()).await?;
    tracing::info!(drive_url = %mapping.drive_url, "Default mapping ready");
    Ok(mapping)
}
