//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::BearerError;
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed value-object validation (already carries a user-facing message)
    #[error(transparent)]
    Validation(AppError),

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email, wrong password, or a password that cannot be valid
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No usable bearer credential on the request
    #[error("Authentication required")]
    MissingToken(#[source] BearerError),

    /// Bearer token failed verification
    #[error("Invalid or expired token")]
    InvalidToken(#[source] TokenError),

    /// User not found (or not visible to the caller)
    #[error("User not found")]
    UserNotFound,

    /// Password hashing failed
    #[error("Password hashing failed")]
    PasswordHash(#[from] PasswordHashError),

    /// Token could not be minted
    #[error("Token issuance failed")]
    TokenIssue(#[source] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(e) => e.kind(),
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken(_)
            | AuthError::InvalidToken(_) => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) => ErrorKind::InternalServerError,
            AuthError::PasswordHash(_) | AuthError::TokenIssue(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the response must carry a `WWW-Authenticate: Bearer` challenge
    fn is_bearer_challenge(&self) -> bool {
        matches!(self, AuthError::MissingToken(_) | AuthError::InvalidToken(_))
    }

    /// Convert to AppError
    ///
    /// Database errors go through the kernel's SQLSTATE mapping, so pool
    /// exhaustion still surfaces as 503.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(e) => e,
            AuthError::Database(e) => AppError::from(e),
            AuthError::EmailTaken => AppError::conflict("Email is already registered")
                .with_action("Sign in or use a different email"),
            AuthError::MissingToken(e) => AppError::unauthorized("Authentication required")
                .with_action("Sign in and send the token as 'Authorization: Bearer <token>'")
                .with_source(e),
            AuthError::InvalidToken(e) => AppError::unauthorized("Invalid or expired token")
                .with_action("Sign in again")
                .with_source(e),
            AuthError::PasswordHash(e) => AppError::internal("Password hashing failed").with_source(e),
            AuthError::TokenIssue(e) => AppError::internal("Token issuance failed").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Security-relevant events only; the kernel logs everything else
    fn log(&self) {
        match self {
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken(e) => {
                tracing::warn!(reason = %e, "Rejected bearer token");
            }
            AuthError::MissingToken(e) => {
                tracing::debug!(reason = %e, "Missing bearer credential");
            }
            _ => {}
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.is_bearer_challenge();
        let mut response = self.into_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Validation(err)
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        AuthError::MissingToken(err)
    }
}
