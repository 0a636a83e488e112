//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::protect;

/// Create the Auth router for any repository implementation
///
/// `/register` and `/login` are public; `/user/{email}` and `/me` require a
/// bearer token.
pub fn auth_router<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    let public = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>));

    let protected = protect(
        Router::new()
            .route("/user/{email}", get(handlers::user_by_email::<R>))
            .route("/me", get(handlers::me::<R>)),
        config,
    );

    public.merge(protected).with_state(state)
}
