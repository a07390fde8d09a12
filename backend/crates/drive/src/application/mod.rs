//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod mappings;
pub mod resolve;
pub mod seed;

// Re-exports
pub use config::DriveConfig;
pub use mappings::{CreateMappingInput, MappingAdminUseCase, UpdateMappingInput};
pub use resolve::{Resolution, ResolveDriveUseCase};
pub use seed::ensure_default_mapping;
