//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B length policy)
//! - Signed, time-limited session tokens (HS256 JWT)
//! - Cookie management
//! - Client metadata extraction (IP, User-Agent)
//! - Random secret generation and Base64 helpers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
