//! Infrastructure Layer
//!
//! Payment processor clients.

pub mod stripe;

pub use stripe::{StripeConfig, StripeGateway};
