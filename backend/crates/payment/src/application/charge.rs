//! Charge Use Case
//!
//! Validates the request and forwards it to the processor on behalf of the
//! authenticated caller.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::PaymentConfig;
use crate::domain::entities::{ChargeReceipt, ChargeRequest};
use crate::domain::gateway::PaymentGateway;
use crate::domain::value_objects::{Amount, Currency, SourceToken};
use crate::error::{PaymentError, PaymentResult};

/// Input for a charge
#[derive(Debug, Clone)]
pub struct ChargeInput {
    pub user_id: UserId,
    pub token: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

/// Charge use case
pub struct ChargeUseCase<G>
where
    G: PaymentGateway,
{
    gateway: Arc<G>,
    config: Arc<PaymentConfig>,
}

impl<G> ChargeUseCase<G>
where
    G: PaymentGateway,
{
    pub fn new(gateway: Arc<G>, config: Arc<PaymentConfig>) -> Self {
        Self { gateway, config }
    }

    pub async fn execute(&self, input: ChargeInput) -> PaymentResult<ChargeReceipt> {
        let source = SourceToken::new(input.token.as_deref().unwrap_or_default())?;
        let amount = Amount::new(input.amount.ok_or(PaymentError::InvalidAmount)?)?;
        let currency = match input.currency.as_deref() {
            Some(raw) => Currency::parse(raw)?,
            None => self.config.default_currency.clone(),
        };

        let request = ChargeRequest {
            source,
            amount,
            currency: currency.clone(),
            description: format!("Storefront order for user {}", input.user_id),
            user_id: input.user_id,
        };

        let receipt = self.gateway.charge(request).await?;

        tracing::info!(
            user_id = %input.user_id,
            charge_id = %receipt.charge_id,
            amount_cents = amount.cents(),
            currency = %currency,
            status = %receipt.status,
            "Charge created"
        );

        Ok(receipt)
    }
}
