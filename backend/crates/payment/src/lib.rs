//! Payment Backend Module
//!
//! Forwards `{token, amount}` charges to an external processor on behalf of
//! the authenticated caller.
//!
//! - `domain/` - Charge types and the `PaymentGateway` trait
//! - `application/` - Charge use case
//! - `infra/` - Stripe client
//! - `presentation/` - `/payment` handler and router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PaymentConfig;
pub use domain::gateway::PaymentGateway;
pub use error::{PaymentError, PaymentResult};
pub use infra::stripe::{StripeConfig, StripeGateway};
pub use presentation::router::payment_router;

#[cfg(test)]
mod tests;
