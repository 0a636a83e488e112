//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use kernel::extract::{ApiJson, AuthenticatedUser};
use std::sync::Arc;

use crate::application::{ChargeInput, ChargeUseCase, PaymentConfig};
use crate::domain::gateway::PaymentGateway;
use crate::error::PaymentResult;
use crate::presentation::dto::{PaymentRequest, PaymentResponse};

/// Shared state for payment handlers
#[derive(Clone)]
pub struct PaymentAppState<G>
where
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    pub gateway: Arc<G>,
    pub config: Arc<PaymentConfig>,
}

/// POST /payment
pub async fn create_payment<G>(
    State(state): State<PaymentAppState<G>>,
    caller: AuthenticatedUser,
    ApiJson(req): ApiJson<PaymentRequest>,
) -> PaymentResult<Json<PaymentResponse>>
where
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let receipt = ChargeUseCase::new(state.gateway.clone(), state.config.clone())
        .execute(ChargeInput {
            user_id: caller.user_id,
            token: req.token,
            amount: req.amount,
            currency: req.currency,
        })
        .await?;

    Ok(Json(PaymentResponse {
        success: true,
        data: receipt.charge_id,
    }))
}
