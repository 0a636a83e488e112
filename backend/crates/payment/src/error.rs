//! Payment Error Types
//!
//! This module provides payment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Processor failures
//! render as a generic 500; the detail only reaches the logs.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Payment-specific result type alias
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Payment-specific error variants
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No payment source token in the request
    #[error("Payment token is required")]
    MissingSource,

    /// Amount absent, zero, or negative
    #[error("Amount must be a positive integer in the smallest currency unit")]
    InvalidAmount,

    /// Currency is not a three-letter ISO 4217 code
    #[error("Currency must be a three-letter ISO 4217 code")]
    InvalidCurrency,

    /// Processor answered with a non-success status
    #[error("Payment processor rejected the charge ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Processor unreachable, timed out, or sent an unreadable body
    #[error("Payment processor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway misconfiguration
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::MissingSource
            | PaymentError::InvalidAmount
            | PaymentError::InvalidCurrency => ErrorKind::BadRequest,
            PaymentError::Upstream { .. }
            | PaymentError::Transport(_)
            | PaymentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            PaymentError::Transport(e) => AppError::internal("Payment processor request failed")
                .with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        if let PaymentError::Upstream { status, .. } = self {
            tracing::warn!(status, "Charge rejected by payment processor");
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
