//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

// Re-exports
pub use handlers::CartAppState;
pub use router::{cart_router, catalog_router};
