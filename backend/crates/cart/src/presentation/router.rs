//! Cart Router

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::CartConfig;
use crate::domain::repository::{CartRepository, ProductRepository};
use crate::presentation::handlers::{self, CartAppState};

/// Public product catalog routes
pub fn catalog_router<R>(repo: R, config: Arc<CartConfig>) -> Router
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let state = CartAppState {
        repo: Arc::new(repo),
        config,
    };

    Router::new()
        .route("/products", get(handlers::list_products::<R>))
        .route("/products/{id}", get(handlers::get_product::<R>))
        .with_state(state)
}

/// Cart routes
///
/// Every handler takes `AuthenticatedUser`, so the caller must wrap this
/// router with the bearer middleware.
pub fn cart_router<R>(repo: R, config: Arc<CartConfig>) -> Router
where
    R: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let state = CartAppState {
        repo: Arc::new(repo),
        config,
    };

    Router::new()
        .route(
            "/cart",
            get(handlers::get_cart::<R>).delete(handlers::clear_cart::<R>),
        )
        .route("/cart/items", post(handlers::add_item::<R>))
        .route(
            "/cart/items/{product_id}",
            delete(handlers::remove_item::<R>).patch(handlers::update_item::<R>),
        )
        .with_state(state)
}
