//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CartItem, Product};
use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::value_objects::{MAX_QUANTITY, Page, Quantity};
use crate::error::{CartError, CartResult};

/// Foreign key from `cart_items.product_id` to `products`
const CART_ITEMS_PRODUCT_FKEY: &str = "cart_items_product_id_fkey";

/// Foreign key from `cart_items.user_id` to `users`
const CART_ITEMS_USER_FKEY: &str = "cart_items_user_id_fkey";

/// PostgreSQL-backed cart and catalog repository
#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCartRepository {
    async fn list(&self, page: Page) -> CartResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                product_id,
                name,
                description,
                price_cents,
                currency,
                image_url,
                created_at
            FROM products
            ORDER BY name, product_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> CartResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                product_id,
                name,
                description,
                price_cents,
                currency,
                image_url,
                created_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }
}

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgCartRepository {
    async fn owner_exists(&self, user_id: &UserId) -> CartResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn items(&self, user_id: &UserId) -> CartResult<Vec<CartItem>> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.price_cents,
                p.currency,
                p.image_url,
                p.created_at,
                c.quantity
            FROM cart_items c
            JOIN products p ON p.product_id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.added_at, p.product_id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CartItemRow::into_item).collect()
    }

    async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> CartResult<Quantity> {
        // One statement: concurrent adds of the same product serialize on the
        // row lock and both increments land. The WHERE leaves the row as-is
        // when the sum would pass the maximum, and RETURNING yields nothing.
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity, added_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            ON CONFLICT (user_id, product_id) DO UPDATE
                SET quantity = cart_items.quantity + EXCLUDED.quantity,
                    updated_at = now()
                WHERE cart_items.quantity + EXCLUDED.quantity <= $4
            RETURNING quantity
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .bind(i32::from(quantity))
        .bind(MAX_QUANTITY as i32)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(total)) => quantity_from_db(total),
            Ok(None) => Err(CartError::QuantityExceeded { max: MAX_QUANTITY }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                match db_err.constraint() {
                    Some(CART_ITEMS_PRODUCT_FKEY) => Err(CartError::ProductNotFound),
                    Some(CART_ITEMS_USER_FKEY) => Err(CartError::OwnerNotFound),
                    _ => Err(sqlx::Error::Database(db_err).into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> CartResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE cart_items SET
                quantity = $3,
                updated_at = now()
            WHERE user_id = $1 AND product_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .bind(i32::from(quantity))
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> CartResult<bool> {
        let deleted = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id.as_uuid())
            .bind(product_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn clear(&self, user_id: &UserId) -> CartResult<u64> {
        let deleted = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    name: String,
    description: Option<String>,
    price_cents: i64,
    currency: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            product_id: ProductId::from_uuid(self.product_id),
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            currency: self.currency,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    #[sqlx(flatten)]
    product: ProductRow,
    quantity: i32,
}

impl CartItemRow {
    fn into_item(self) -> CartResult<CartItem> {
        Ok(CartItem {
            product: self.product.into_product(),
            quantity: quantity_from_db(self.quantity)?,
        })
    }
}

/// The table CHECK keeps stored quantities in range
fn quantity_from_db(value: i32) -> CartResult<Quantity> {
    u32::try_from(value)
        .ok()
        .and_then(Quantity::new)
        .ok_or_else(|| CartError::Internal(format!("Stored quantity out of range: {}", value)))
}
