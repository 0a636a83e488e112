//! Domain Layer
//!
//! Contains entities, value objects, domain services, and repository traits.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{Cart, CartItem, CartLine, Product};
pub use repository::{CartRepository, ProductRepository};
pub use value_objects::{MAX_QUANTITY, Page, Quantity};
