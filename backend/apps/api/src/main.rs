//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::{AuthConfig, PgAuthRepository};
use cart::{CartConfig, PgCartRepository};
use payment::domain::Currency;
use payment::{PaymentConfig, StripeConfig, StripeGateway};
use platform::token::TokenKeys;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppDeps, build_router, with_http_layers};
use crate::config::ServerConfig;

/// Wait for a pooled connection this long before failing the request
const DATABASE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,cart=info,payment=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr();

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(DATABASE_ACQUIRE_TIMEOUT)
        .connect(config.database_url.expose_secret())
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let token_keys = TokenKeys::from_secret(config.token_secret.expose_secret().as_bytes())?;
    let auth_config = AuthConfig::new(token_keys, config.token_ttl, config.hashing()?)?;

    // Payment configuration
    let payment_config = PaymentConfig::new(Currency::parse(&config.payment_currency)?);
    let gateway = StripeGateway::new(
        StripeConfig::new(config.payment_api_key).with_base_url(config.payment_base_url),
    )?;

    // Build router
    let router = build_router(AppDeps {
        users: PgAuthRepository::new(pool.clone()),
        carts: PgCartRepository::new(pool.clone()),
        gateway,
        auth: Arc::new(auth_config),
        cart: Arc::new(CartConfig::default()),
        payment: Arc::new(payment_config),
    });
    let app = with_http_layers(router, &config.frontend_origins, config.request_timeout);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
