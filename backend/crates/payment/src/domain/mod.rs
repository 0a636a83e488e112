//! Domain Layer
//!
//! Contains entities, value objects, and the gateway trait.

pub mod entities;
pub mod gateway;
pub mod value_objects;

// Re-exports
pub use entities::{ChargeReceipt, ChargeRequest};
pub use gateway::PaymentGateway;
pub use value_objects::{Amount, Currency, SourceToken};
