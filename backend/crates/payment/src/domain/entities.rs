//! Domain Entities

use kernel::id::UserId;

use crate::domain::value_objects::{Amount, Currency, SourceToken};

/// Charge to forward to the processor
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub source: SourceToken,
    pub amount: Amount,
    pub currency: Currency,
    pub description: String,
    /// Caller on whose behalf the charge is made
    pub user_id: UserId,
}

/// Processor's acknowledgement of a charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    pub charge_id: String,
    pub status: String,
}
