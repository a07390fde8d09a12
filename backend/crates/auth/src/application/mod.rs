//! Application Layer
//!
//! Use cases and application services.

pub mod admin_users;
pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod guard;
pub mod login;
pub mod profile;
pub mod register;

// Re-exports
pub use admin_users::{AdminCreateInput, AdminUpdateInput, AdminUsersUseCase};
pub use bootstrap::promote_admin;
pub use config::AuthConfig;
pub use guard::{AuthGuard, Identity};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{UpdateProfileInput, UpdateProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
