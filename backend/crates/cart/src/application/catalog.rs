//! Catalog Use Case
//!
//! Read-only product listing so clients can discover product ids.

use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::id::ProductId;

use crate::application::config::CartConfig;
use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::Page;
use crate::error::{CartError, CartResult};

/// Catalog use case
pub struct CatalogUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
    config: Arc<CartConfig>,
}

impl<P> CatalogUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>, config: Arc<CartConfig>) -> Self {
        Self {
            product_repo,
            config,
        }
    }

    pub async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> CartResult<Vec<Product>> {
        let page = self.page(limit, offset)?;
        self.product_repo.list(page).await
    }

    pub async fn get(&self, product_id: &ProductId) -> CartResult<Product> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)
    }

    fn page(&self, limit: Option<u32>, offset: Option<u32>) -> CartResult<Page> {
        let limit = limit.unwrap_or(self.config.default_page_size);
        if limit == 0 || limit > self.config.max_page_size {
            return Err(AppError::bad_request(format!(
                "limit must be between 1 and {}",
                self.config.max_page_size
            ))
            .into());
        }

        Ok(Page {
            limit,
            offset: offset.unwrap_or(0),
        })
    }
}
