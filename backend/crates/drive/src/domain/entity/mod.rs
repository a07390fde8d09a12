pub mod access_log;
pub mod default_mapping;
pub mod domain_mapping;
