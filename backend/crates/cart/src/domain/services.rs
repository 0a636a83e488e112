//! Domain Services
//!
//! Pure cart rules shared by every repository implementation.

use crate::domain::value_objects::{MAX_QUANTITY, Quantity};
use crate::error::{CartError, CartResult};

/// Quantity after adding `added` to an optional existing line
///
/// A product appears at most once per cart, so a repeated add increments.
pub fn merge_quantity(existing: Option<Quantity>, added: Quantity) -> CartResult<Quantity> {
    match existing {
        None => Ok(added),
        Some(current) => current
            .checked_add(added)
            .ok_or(CartError::QuantityExceeded { max: MAX_QUANTITY }),
    }
}

/// Price × quantity, saturating
pub fn line_total_cents(price_cents: i64, quantity: Quantity) -> i64 {
    price_cents.saturating_mul(i64::from(quantity.get()))
}
