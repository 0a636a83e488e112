//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use kernel::error::app_error::AppError;
use kernel::extract::{ApiJson, ApiQuery, AuthenticatedUser};
use kernel::id::ProductId;
use std::sync::Arc;

use crate::application::{CartConfig, CartUseCase, CatalogUseCase};
use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::value_objects::Quantity;
use crate::error::CartResult;
use crate::presentation::dto::{
    AddItemRequest, CartView, DataResponse, LineView, ListProductsQuery, MessageResponse,
    ProductView, UpdateQuantityRequest,
};

/// Shared state for cart and catalog handlers
#[derive(Clone)]
pub struct CartAppState<R>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CartConfig>,
}

fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse::<ProductId>().map_err(AppError::from)
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /products
pub async fn list_products<R>(
    State(state): State<CartAppState<R>>,
    ApiQuery(query): ApiQuery<ListProductsQuery>,
) -> CartResult<Json<DataResponse<Vec<ProductView>>>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let products = CatalogUseCase::new(state.repo.clone(), state.config.clone())
        .list(query.limit, query.offset)
        .await?;

    Ok(Json(DataResponse::new(
        products.iter().map(ProductView::from).collect(),
    )))
}

/// GET /products/{id}
pub async fn get_product<R>(
    State(state): State<CartAppState<R>>,
    Path(id): Path<String>,
) -> CartResult<Json<DataResponse<ProductView>>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let product = CatalogUseCase::new(state.repo.clone(), state.config.clone())
        .get(&product_id)
        .await?;

    Ok(Json(DataResponse::new(ProductView::from(&product))))
}

// ============================================================================
// Cart (requires authentication)
// ============================================================================

/// GET /cart
pub async fn get_cart<R>(
    State(state): State<CartAppState<R>>,
    caller: AuthenticatedUser,
) -> CartResult<Json<DataResponse<CartView>>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let cart = CartUseCase::new(state.repo.clone())
        .get_cart(&caller.user_id)
        .await?;

    Ok(Json(DataResponse::new(CartView::from(&cart))))
}

/// POST /cart/items
pub async fn add_item<R>(
    State(state): State<CartAppState<R>>,
    caller: AuthenticatedUser,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> CartResult<Json<DataResponse<LineView>>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let quantity = req.quantity.unwrap_or(Quantity::ONE.get());
    let total = CartUseCase::new(state.repo.clone())
        .add_item(&caller.user_id, &req.product_id, quantity)
        .await?;

    Ok(Json(DataResponse::new(LineView {
        product_id: req.product_id,
        quantity: total.get(),
    })))
}

/// PATCH /cart/items/{productId}
pub async fn update_item<R>(
    State(state): State<CartAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateQuantityRequest>,
) -> CartResult<Json<DataResponse<LineView>>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let quantity = CartUseCase::new(state.repo.clone())
        .update_quantity(&caller.user_id, &product_id, req.quantity)
        .await?;

    Ok(Json(DataResponse::new(LineView {
        product_id,
        quantity: quantity.get(),
    })))
}

/// DELETE /cart/items/{productId}
pub async fn remove_item<R>(
    State(state): State<CartAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> CartResult<Json<MessageResponse>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    CartUseCase::new(state.repo.clone())
        .remove_item(&caller.user_id, &product_id)
        .await?;

    Ok(Json(MessageResponse::new("Item removed from cart")))
}

/// DELETE /cart
pub async fn clear_cart<R>(
    State(state): State<CartAppState<R>>,
    caller: AuthenticatedUser,
) -> CartResult<Json<MessageResponse>>
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    CartUseCase::new(state.repo.clone())
        .clear(&caller.user_id)
        .await?;

    Ok(Json(MessageResponse::new("Cart cleared")))
}
