//! Auth Middleware
//!
//! Bearer-token verification for protected routes.

use axum::Router;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use kernel::extract::AuthenticatedUser;
use platform::client::{extract_bearer_token, extract_client_ip};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::authenticate;
use crate::error::AuthError;

/// Middleware that requires a valid bearer token
///
/// On success the caller's identity is stored as [`AuthenticatedUser`] in
/// request extensions. Every failure is a 401 with `WWW-Authenticate: Bearer`.
pub async fn require_bearer(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let result = extract_bearer_token(req.headers())
        .map_err(AuthError::from)
        .and_then(|token| authenticate(&config, token));

    let user_id = match result {
        Ok(user_id) => user_id,
        Err(e) => {
            let direct_ip = req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip());
            tracing::debug!(
                client_ip = ?extract_client_ip(req.headers(), direct_ip),
                path = %req.uri().path(),
                "Unauthenticated request to protected route"
            );
            return Err(e);
        }
    };

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Put every route of `router` behind [`require_bearer`]
pub fn protect<S>(router: Router<S>, config: Arc<AuthConfig>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(config, require_bearer))
}
