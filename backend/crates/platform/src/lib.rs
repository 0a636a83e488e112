//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with tunable cost)
//! - Signed bearer tokens (HS256 JWT)
//! - Request header helpers (bearer credentials, client IP)

pub mod client;
pub mod password;
pub mod token;
