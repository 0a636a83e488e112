//! Application Layer
//!
//! Use cases and application services.

pub mod cart;
pub mod catalog;
pub mod config;

// Re-exports
pub use cart::CartUseCase;
pub use catalog::CatalogUseCase;
pub use config::CartConfig;
