//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Payment request
///
/// Fields are optional so that a missing one gets a specific 400 message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub token: Option<String>,
    /// Smallest currency unit
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Payment response; `data` is the processor's charge id
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub data: String,
}
