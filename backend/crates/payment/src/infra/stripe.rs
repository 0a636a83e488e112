//! Stripe Gateway
//!
//! Creates charges through `POST {base_url}/v1/charges` with a form-encoded
//! body and the secret API key as bearer credential.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::entities::{ChargeReceipt, ChargeRequest};
use crate::domain::gateway::PaymentGateway;
use crate::error::{PaymentError, PaymentResult};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Whole-request timeout for one charge
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stripe connection settings
#[derive(Debug)]
pub struct StripeConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout: Duration,
}

impl StripeConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Stripe charges client
#[derive(Clone)]
pub struct StripeGateway {
    inner: Arc<StripeGatewayInner>,
}

struct StripeGatewayInner {
    client: reqwest::Client,
    api_key: SecretString,
    charges_url: String,
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::Internal(format!("HTTP client build failed: {}", e)))?;

        let charges_url = format!("{}/v1/charges", config.base_url.trim_end_matches('/'));

        Ok(Self {
            inner: Arc::new(StripeGatewayInner {
                client,
                api_key: config.api_key,
                charges_url,
            }),
        })
    }
}

impl PaymentGateway for StripeGateway {
    async fn charge(&self, request: ChargeRequest) -> PaymentResult<ChargeReceipt> {
        let params = [
            ("amount", request.amount.cents().to_string()),
            ("currency", request.currency.as_str().to_string()),
            ("source", request.source.as_str().to_string()),
            ("description", request.description),
            ("metadata[user_id]", request.user_id.to_string()),
        ];

        let response = self
            .inner
            .client
            .post(&self.inner.charges_url)
            .bearer_auth(self.inner.api_key.expose_secret())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<StripeErrorBody>().await {
                Ok(body) => body.error.message.unwrap_or_default(),
                Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
            };
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let charge: StripeCharge = response.json().await?;

        if charge.status == "failed" {
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                message: charge.failure_message.unwrap_or_default(),
            });
        }

        Ok(ChargeReceipt {
            charge_id: charge.id,
            status: charge.status,
        })
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct StripeCharge {
    id: String,
    status: String,
    #[serde(default)]
    failure_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}
