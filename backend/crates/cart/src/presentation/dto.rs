//! API DTOs (Data Transfer Objects)

use kernel::id::ProductId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Cart, CartItem, Product};

// ============================================================================
// Requests
// ============================================================================

/// Add-to-cart request (`quantity` defaults to 1)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Absolute quantity for an existing line
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// `?limit&offset` for the product listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ============================================================================
// Responses
// ============================================================================

/// `{success, data}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success, message}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.product_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            currency: product.currency.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_total_cents: i64,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product: ProductView::from(&item.product),
            quantity: item.quantity.get(),
            line_total_cents: item.line_total_cents(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_cents: i64,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            total_cents: cart.total_cents(),
            item_count: cart.item_count(),
        }
    }
}

/// Line state after an add or update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub product_id: ProductId,
    pub quantity: u32,
}
