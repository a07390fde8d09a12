//! PostgreSQL Repository Implementation

use auth::models::UserId;
use sqlx::PgPool;

use crate::domain::entity::access_log::{AccessLog, NewAccessLog};
use crate::domain::entity::default_mapping::DefaultMapping;
use crate::domain::entity::domain_mapping::{DomainMapping, MappingChanges, NewDomainMapping};
use crate::domain::repository::{AccessLogRepository, MappingRepository};
use crate::domain::value_object::domain_name::DomainName;
use crate::domain::value_object::mapping_id::{AccessLogId, DEFAULT_MAPPING_ID, MappingId};
use crate::error::DriveResult;

const MAPPING_COLUMNS: &str =
    "id, domain, drive_url, description, is_active, created_at, updated_at, created_by";

/// PostgreSQL-backed mapping and access-log repository
#[derive(Clone)]
pub struct PgDriveRepository {
    pool: PgPool,
}

impl PgDriveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Mapping Repository Implementation
// ============================================================================

impl MappingRepository for PgDriveRepository {
    async fn list(&self) -> DriveResult<Vec<DomainMapping>> {
        let rows = sqlx::query_as::<_, MappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM domain_mappings ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MappingRow::into_mapping).collect())
    }

    async fn find_by_id(&self, id: MappingId) -> DriveResult<Option<DomainMapping>> {
        let row = sqlx::query_as::<_, MappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM domain_mappings WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MappingRow::into_mapping))
    }

    async fn find_active_by_domain(&self, domain: &DomainName) -> DriveResult<Option<DomainMapping>> {
        let row = sqlx::query_as::<_, MappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM domain_mappings
             WHERE domain = $1 AND is_active
             ORDER BY id
             LIMIT 1"
        ))
        .bind(domain.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MappingRow::into_mapping))
    }

    async fn create(&self, mapping: NewDomainMapping) -> DriveResult<DomainMapping> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO domain_mappings (
                domain,
                drive_url,
                description,
                is_active,
                created_at,
                updated_at,
                created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(mapping.domain.as_str())
        .bind(&mapping.drive_url)
        .bind(&mapping.description)
        .bind(mapping.is_active)
        .bind(mapping.created_at)
        .bind(mapping.updated_at)
        .bind(mapping.created_by.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(mapping.into_mapping(MappingId::from_raw(id)))
    }

    async fn update(&self, id: MappingId, changes: &MappingChanges, at: i64) -> DriveResult<u64> {
        let affected = sqlx::query(
            r#"
            UPDATE domain_mappings SET
                domain = COALESCE($2, domain),
                drive_url = COALESCE($3, drive_url),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(changes.domain.as_ref().map(DomainName::as_str))
        .bind(changes.drive_url.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.is_active)
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected)
    }

    async fn delete(&self, id: MappingId) -> DriveResult<u64> {
        let affected = sqlx::query("DELETE FROM domain_mappings WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected)
    }

    async fn get_default(&self) -> DriveResult<Option<DefaultMapping>> {
        let row = sqlx::query_as::<_, DefaultRow>(
            "SELECT drive_url, updated_at, updated_by FROM default_mapping WHERE id = $1",
        )
        .bind(DEFAULT_MAPPING_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DefaultRow::into_default))
    }

    async fn upsert_default(
        &self,
        drive_url: &str,
        updated_by: Option<UserId>,
        at: i64,
    ) -> DriveResult<DefaultMapping> {
        let row = sqlx::query_as::<_, DefaultRow>(
            r#"
            INSERT INTO default_mapping (id, drive_url, updated_at, updated_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                drive_url = EXCLUDED.drive_url,
                updated_at = EXCLUDED.updated_at,
                updated_by = EXCLUDED.updated_by
            RETURNING drive_url, updated_at, updated_by
            "#,
        )
        .bind(DEFAULT_MAPPING_ID)
        .bind(drive_url)
        .bind(at)
        .bind(updated_by.map(|id| id.get()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_default())
    }

    async fn seed_default(&self, drive_url: &str, at: i64) -> DriveResult<DefaultMapping> {
        sqlx::query(
            r#"
            INSERT INTO default_mapping (id, drive_url, updated_at, updated_by)
            VALUES ($1, $2, $3, NULL)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(DEFAULT_MAPPING_ID)
        .bind(drive_url)
        .bind(at)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, DefaultRow>(
            "SELECT drive_url, updated_at, updated_by FROM default_mapping WHERE id = $1",
        )
        .bind(DEFAULT_MAPPING_ID)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_default())
    }
}

// ============================================================================
// Access Log Repository Implementation
// ============================================================================

impl AccessLogRepository for PgDriveRepository {
    async fn append(&self, entry: NewAccessLog) -> DriveResult<AccessLog> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO access_logs (
                user_id,
                domain,
                drive_url,
                timestamp,
                ip_address,
                user_agent
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(entry.user_id.get())
        .bind(&entry.domain)
        .bind(&entry.drive_url)
        .bind(entry.timestamp)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry.into_log(AccessLogId::from_raw(id)))
    }

    async fn list_for_user(&self, user_id: UserId) -> DriveResult<Vec<AccessLog>> {
        let rows = sqlx::query_as::<_, AccessLogRow>(
            r#"
            SELECT id, user_id, domain, drive_url, timestamp, ip_address, user_agent
            FROM access_logs
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AccessLogRow::into_log).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    domain: String,
    drive_url: String,
    description: String,
    is_active: bool,
    created_at: i64,
    updated_at: i64,
    created_by: i64,
}

impl MappingRow {
    fn into_mapping(self) -> DomainMapping {
        DomainMapping {
            id: MappingId::from_raw(self.id),
            domain: DomainName::from_db(self.domain),
            drive_url: self.drive_url,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by: UserId::from_raw(self.created_by),
        }
    }
}

#[derive(sqlx::FromRow)]
struct DefaultRow {
    drive_url: String,
    updated_at: i64,
    updated_by: Option<i64>,
}

impl DefaultRow {
    fn into_default(self) -> DefaultMapping {
        DefaultMapping {
            drive_url: self.drive_url,
            updated_at: self.updated_at,
            updated_by: self.updated_by.map(UserId::from_raw),
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccessLogRow {
    id: i64,
    user_id: i64,
    domain: String,
    drive_url: String,
    timestamp: i64,
    ip_address: String,
    user_agent: String,
}

impl AccessLogRow {
    fn into_log(self) -> AccessLog {
        AccessLog {
            id: AccessLogId::from_raw(self.id),
            user_id: UserId::from_raw(self.user_id),
            domain: self.domain,
            drive_url: self.drive_url,
            timestamp: self.timestamp,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
        }
    }
}
