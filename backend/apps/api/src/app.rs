//! Router assembly
//!
//! Public routes: `/register`, `/login`, `/products`, `/health`.
//! Everything else sits behind the bearer middleware.

use std::sync::Arc;
use std::time::Duration;

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cart::CartConfig;
use cart::domain::repository::{CartRepository, ProductRepository};
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use payment::{PaymentConfig, PaymentGateway};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Everything the routers need, constructed once at startup
pub struct AppDeps<U, C, G> {
    pub users: U,
    pub carts: C,
    pub gateway: G,
    pub auth: Arc<AuthConfig>,
    pub cart: Arc<CartConfig>,
    pub payment: Arc<PaymentConfig>,
}

/// All routes, without the outer HTTP layers
pub fn build_router<U, C, G>(deps: AppDeps<U, C, G>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: CartRepository + ProductRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let protected = cart::cart_router(deps.carts.clone(), deps.cart.clone())
        .merge(payment::payment_router(deps.gateway, deps.payment));

    Router::new()
        .route("/health", get(health))
        .merge(auth::auth_router(deps.users, deps.auth.clone()))
        .merge(cart::catalog_router(deps.carts, deps.cart))
        .merge(auth::protect(protected, deps.auth))
        .fallback(route_not_found)
}

/// Request tracing, timeout, and CORS
pub fn with_http_layers(router: Router, origins: &[String], timeout: Duration) -> Router {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    router
        .layer(middleware::from_fn_with_state(timeout, enforce_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Abandon the handler after `timeout` and answer 408 in the error envelope
async fn enforce_timeout(State(timeout): State<Duration>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();

    match tokio::time::timeout(timeout, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(path = %path, timeout_ms = timeout.as_millis() as u64, "Request timed out");
            AppError::new(ErrorKind::RequestTimeout, "Request timed out")
                .with_action("Try again later")
                .into_response()
        }
    }
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    success: bool,
    message: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running",
    })
}
