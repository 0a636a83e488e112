//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HS256 bearer tokens (no server-side sessions)
//! - Bearer middleware shared by every protected route in the API
//! - Owner-only profile lookup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Login failures are indistinguishable (same 401, same hashing cost)
//! - Token verification is a pure function of token, secret, and clock

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::middleware::{protect, require_bearer};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
pub use kernel::extract::AuthenticatedUser;
