//! Domain Entities
//!
//! Catalog products and the line items that make up a user's cart. A cart
//! has no row of its own: it is the set of lines owned by one user.

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, UserId};

use crate::domain::services::line_total_cents;
use crate::domain::value_objects::Quantity;

/// Catalog product (read-only from this service)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit
    pub price_cents: i64,
    /// ISO 4217 code, lower-case
    pub currency: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, price_cents: i64, currency: impl Into<String>) -> Self {
        Self {
            product_id: ProductId::new(),
            name: name.into(),
            description: None,
            price_cents,
            currency: currency.into(),
            image_url: None,
            created_at: Utc::now(),
        }
    }
}

/// One product/quantity pair in a cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart line with its product resolved from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    pub fn line_total_cents(&self) -> i64 {
        line_total_cents(self.product.price_cents, self.quantity)
    }
}

/// A user's cart, ready for display
#[derive(Debug, Clone)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn total_cents(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total_cents()))
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity.get()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
