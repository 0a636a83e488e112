//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCartRepository;
pub use postgres::PgCartRepository;
