//! Payment Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::PaymentConfig;
use crate::domain::gateway::PaymentGateway;
use crate::presentation::handlers::{self, PaymentAppState};

/// Create the payment router
///
/// The handler takes `AuthenticatedUser`, so the caller must wrap this
/// router with the bearer middleware.
pub fn payment_router<G>(gateway: G, config: Arc<PaymentConfig>) -> Router
where
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let state = PaymentAppState {
        gateway: Arc::new(gateway),
        config,
    };

    Router::new()
        .route("/payment", post(handlers::create_payment::<G>))
        .with_state(state)
}
