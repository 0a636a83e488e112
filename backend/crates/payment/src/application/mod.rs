//! Application Layer
//!
//! Use cases and application services.

pub mod charge;
pub mod config;

// Re-exports
pub use charge::{ChargeInput, ChargeUseCase};
pub use config::PaymentConfig;
