//! Value Object Module

pub mod domain_name;
pub mod mapping_id;
