//! Presentation Layer
//!
//! HTTP handler, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PaymentAppState;
pub use router::payment_router;
