//! Cart Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, quantity rules, repository traits
//! - `application/` - Cart and catalog use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! A cart has no row of its own: it is the set of `(user_id, product_id)`
//! lines owned by one user, and each product appears at most once.
//! Handlers only ever read the owner from `AuthenticatedUser`, so the cart
//! router must sit behind the bearer middleware.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CartConfig;
pub use error::{CartError, CartResult};
pub use infra::{memory::InMemoryCartRepository, postgres::PgCartRepository};
pub use presentation::router::{cart_router, catalog_router};

#[cfg(test)]
mod tests;
