//! Cart Error Types
//!
//! This module provides cart-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Cart-specific result type alias
pub type CartResult<T> = Result<T, CartError>;

/// Cart-specific error variants
#[derive(Debug, Error)]
pub enum CartError {
    /// Malformed input (identifier, pagination) with a user-facing message
    #[error(transparent)]
    Validation(AppError),

    /// Quantity outside 1..=max
    #[error("Quantity must be between {min} and {max}")]
    InvalidQuantity { min: u32, max: u32 },

    /// Incrementing would pass the per-line maximum
    #[error("Quantity cannot exceed {max} per item")]
    QuantityExceeded { max: u32 },

    /// Product not in the catalog
    #[error("Product not found")]
    ProductNotFound,

    /// The cart's owner does not exist
    #[error("User not found")]
    OwnerNotFound,

    /// Product is not in the caller's cart
    #[error("Item not found in cart")]
    LineNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CartError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::Validation(e) => e.kind(),
            CartError::InvalidQuantity { .. } | CartError::QuantityExceeded { .. } => {
                ErrorKind::BadRequest
            }
            CartError::ProductNotFound | CartError::OwnerNotFound | CartError::LineNotFound => {
                ErrorKind::NotFound
            }
            CartError::Database(_) | CartError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            CartError::Validation(e) => e,
            CartError::Database(e) => AppError::from(e),
            CartError::QuantityExceeded { .. } => AppError::new(ErrorKind::BadRequest, self.to_string())
                .with_action("Lower the quantity or check your cart"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        if let CartError::OwnerNotFound = self {
            // Valid token for a user that no longer exists
            tracing::warn!("Cart requested for missing user");
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for CartError {
    fn from(err: AppError) -> Self {
        CartError::Validation(err)
    }
}
