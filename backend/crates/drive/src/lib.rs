//! Drive Routing Backend Module
//!
//! Sends each signed-in user to the Google Drive folder configured for
//! their email domain, with a default folder as fallback.
//!
//! - `domain/` - Mapping entities, domain normalization, repository traits
//! - `application/` - Resolution engine, mapping administration, startup seed
//! - `infra/` - Postgres and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Identity and admin checks come from the `auth` crate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{DriveConfig, ensure_default_mapping};
pub use domain::value_object::domain_name::normalize_domain;
pub use error::{DriveError, DriveResult};
pub use infra::{MemoryDriveRepository, PgDriveRepository};
pub use presentation::{DriveAppState, drive_router};
