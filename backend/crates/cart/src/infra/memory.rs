//! In-memory repository
//!
//! Same contract as the PostgreSQL store. A single mutex serializes every
//! operation, so concurrent adds to the same line never lose an increment.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::id::{ProductId, UserId};

use crate::domain::entities::{CartItem, CartLine, Product};
use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::services::merge_quantity;
use crate::domain::value_objects::{Page, Quantity};
use crate::error::{CartError, CartResult};

#[derive(Default)]
struct Store {
    products: HashMap<ProductId, Product>,
    owners: HashSet<UserId>,
    // Insertion order is the display order
    lines: HashMap<UserId, Vec<CartLine>>,
}

/// Mutex-guarded catalog and cart lines
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a catalog product
    pub fn insert_product(&self, product: Product) -> CartResult<()> {
        self.lock()?.products.insert(product.product_id, product);
        Ok(())
    }

    /// Register a user so their cart can be read
    pub fn insert_owner(&self, user_id: UserId) -> CartResult<()> {
        self.lock()?.owners.insert(user_id);
        Ok(())
    }

    fn lock(&self) -> CartResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| CartError::Internal("cart store lock poisoned".to_string()))
    }
}

impl ProductRepository for InMemoryCartRepository {
    async fn list(&self, page: Page) -> CartResult<Vec<Product>> {
        let store = self.lock()?;
        let mut products: Vec<&Product> = store.products.values().collect();
        products.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.product_id.as_uuid().cmp(b.product_id.as_uuid()))
        });

        Ok(products
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> CartResult<Option<Product>> {
        Ok(self.lock()?.products.get(product_id).cloned())
    }
}

impl CartRepository for InMemoryCartRepository {
    async fn owner_exists(&self, user_id: &UserId) -> CartResult<bool> {
        Ok(self.lock()?.owners.contains(user_id))
    }

    async fn items(&self, user_id: &UserId) -> CartResult<Vec<CartItem>> {
        let store = self.lock()?;
        let Some(lines) = store.lines.get(user_id) else {
            return Ok(Vec::new());
        };

        Ok(lines
            .iter()
            .filter_map(|line| {
                store.products.get(&line.product_id).map(|product| CartItem {
                    product: product.clone(),
                    quantity: line.quantity,
                })
            })
            .collect())
    }

    async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> CartResult<Quantity> {
        let mut store = self.lock()?;
        if !store.products.contains_key(product_id) {
            return Err(CartError::ProductNotFound);
        }
        if !store.owners.contains(user_id) {
            return Err(CartError::OwnerNotFound);
        }

        let now = Utc::now();
        let lines = store.lines.entry(*user_id).or_default();

        match lines.iter_mut().find(|line| line.product_id == *product_id) {
            Some(line) => {
                line.quantity = merge_quantity(Some(line.quantity), quantity)?;
                line.updated_at = now;
                Ok(line.quantity)
            }
            None => {
                lines.push(CartLine {
                    product_id: *product_id,
                    quantity,
                    added_at: now,
                    updated_at: now,
                });
                Ok(quantity)
            }
        }
    }

    async fn set_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> CartResult<bool> {
        let mut store = self.lock()?;
        let line = store
            .lines
            .get_mut(user_id)
            .and_then(|lines| lines.iter_mut().find(|line| line.product_id == *product_id));

        Ok(match line {
            Some(line) => {
                line.quantity = quantity;
                line.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> CartResult<bool> {
        let mut store = self.lock()?;
        let Some(lines) = store.lines.get_mut(user_id) else {
            return Ok(false);
        };

        let before = lines.len();
        lines.retain(|line| line.product_id != *product_id);
        Ok(lines.len() < before)
    }

    async fn clear(&self, user_id: &UserId) -> CartResult<u64> {
        let removed = self
            .lock()?
            .lines
            .remove(user_id)
            .map(|lines| lines.len() as u64)
            .unwrap_or(0);
        Ok(removed)
    }
}
