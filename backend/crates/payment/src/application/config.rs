//! Application Configuration

use crate::domain::value_objects::Currency;

/// Payment application configuration
#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    /// Used when the request names no currency
    pub default_currency: Currency,
}

impl PaymentConfig {
    pub fn new(default_currency: Currency) -> Self {
        Self { default_currency }
    }
}
