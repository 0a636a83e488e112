//! Cart Use Case
//!
//! Every operation is scoped to the owner id passed in, which the HTTP layer
//! only ever takes from the verified bearer token.

use std::sync::Arc;

use kernel::id::{ProductId, UserId};

use crate::domain::entities::Cart;
use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::value_objects::{MAX_QUANTITY, Quantity};
use crate::error::{CartError, CartResult};

/// Cart use case
pub struct CartUseCase<R>
where
    R: CartRepository + ProductRepository,
{
    repo: Arc<R>,
}

impl<R> CartUseCase<R>
where
    R: CartRepository + ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Add `quantity` of a product, incrementing an existing line
    pub async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> CartResult<Quantity> {
        let quantity = parse_quantity(quantity)?;

        if self.repo.find_by_id(product_id).await?.is_none() {
            return Err(CartError::ProductNotFound);
        }

        let total = self.repo.add_item(user_id, product_id, quantity).await?;

        tracing::debug!(
            user_id = %user_id,
            product_id = %product_id,
            quantity = total.get(),
            "Cart item added"
        );

        Ok(total)
    }

    /// The owner's cart with products resolved
    pub async fn get_cart(&self, user_id: &UserId) -> CartResult<Cart> {
        if !self.repo.owner_exists(user_id).await? {
            return Err(CartError::OwnerNotFound);
        }

        let items = self.repo.items(user_id).await?;

        Ok(Cart {
            user_id: *user_id,
            items,
        })
    }

    /// Set the absolute quantity of a line already in the cart
    pub async fn update_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> CartResult<Quantity> {
        let quantity = parse_quantity(quantity)?;

        if !self.repo.set_quantity(user_id, product_id, quantity).await? {
            return Err(CartError::LineNotFound);
        }

        Ok(quantity)
    }

    pub async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> CartResult<()> {
        if !self.repo.remove_item(user_id, product_id).await? {
            return Err(CartError::LineNotFound);
        }
        Ok(())
    }

    /// Remove every line (idempotent)
    pub async fn clear(&self, user_id: &UserId) -> CartResult<u64> {
        let removed = self.repo.clear(user_id).await?;
        tracing::debug!(user_id = %user_id, removed, "Cart cleared");
        Ok(removed)
    }
}

fn parse_quantity(value: u32) -> CartResult<Quantity> {
    Quantity::new(value).ok_or(CartError::InvalidQuantity {
        min: Quantity::MIN,
        max: MAX_QUANTITY,
    })
}
