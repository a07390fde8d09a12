//! Infrastructure Layer
//!
//! Mapping and access-log store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryDriveRepository;
pub use postgres::PgDriveRepository;
