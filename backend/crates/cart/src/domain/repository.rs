//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every cart method takes the owner's id; there is no way to address a
//! line without it.

use kernel::id::{ProductId, UserId};

use crate::domain::entities::{CartItem, Product};
use crate::domain::value_objects::{Page, Quantity};
use crate::error::CartResult;

/// Product catalog repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// List products ordered by name
    async fn list(&self, page: Page) -> CartResult<Vec<Product>>;

    /// Find product by ID
    async fn find_by_id(&self, product_id: &ProductId) -> CartResult<Option<Product>>;
}

/// Cart line repository trait
#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// Whether the cart owner (user) exists
    async fn owner_exists(&self, user_id: &UserId) -> CartResult<bool>;

    /// Lines of the user's cart joined with their products, oldest first
    async fn items(&self, user_id: &UserId) -> CartResult<Vec<CartItem>>;

    /// Insert a line or increment an existing one atomically
    ///
    /// Returns the resulting quantity, or `CartError::QuantityExceeded` if
    /// the sum would pass the maximum (the line is then left unchanged).
    async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> CartResult<Quantity>;

    /// Set the absolute quantity of an existing line; `false` if absent
    async fn set_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> CartResult<bool>;

    /// Remove a line; `false` if absent
    async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> CartResult<bool>;

    /// Remove every line; returns the number removed
    async fn clear(&self, user_id: &UserId) -> CartResult<u64>;
}
