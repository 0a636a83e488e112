//! Payment Gateway Trait
//!
//! Interface to the external processor. Implementation is in infrastructure
//! layer.

use crate::domain::entities::{ChargeReceipt, ChargeRequest};
use crate::error::PaymentResult;

/// Payment processor trait
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// Create a charge; any non-success answer is an error
    async fn charge(&self, request: ChargeRequest) -> PaymentResult<ChargeReceipt>;
}
