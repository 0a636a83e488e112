//! Request extractors
//!
//! [`ApiJson`] wraps `axum::Json` so that body rejections (missing fields,
//! malformed JSON, wrong content type) are rendered with the same envelope
//! as every other error instead of axum's plain-text rejection.
//!
//! [`ApiQuery`] does the same for query strings.
//!
//! [`AuthenticatedUser`] is the identity resolved by the bearer-token
//! middleware. Handlers that take it can only act on that identity.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;
use crate::id::UserId;

/// Caller identity placed in request extensions after token verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only when a protected route was mounted without the middleware
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// JSON body extractor that rejects with [`AppError`] (400)
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())
                .with_action("Check the request body")
                .with_source(rejection)),
        }
    }
}

/// Query string extractor that rejects with [`AppError`] (400)
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())
                .with_action("Check the query parameters")
                .with_source(rejection)),
        }
    }
}
