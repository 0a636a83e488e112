//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::extract::{ApiJson, AuthenticatedUser};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, ProfileUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, ProfileResponse, ProfileView, RegisterRequest, UserView,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
        phone_number: req.phone,
        city: req.city,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token: output.token,
            user: UserView::from(&output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        token: output.token,
        user: UserView::from(&output.user),
    }))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /user/{email}
pub async fn user_by_email<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedUser,
    Path(email): Path<String>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = ProfileUseCase::new(state.repo.clone())
        .by_email(&caller.user_id, &email)
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        data: ProfileView::from(&user),
    }))
}

/// GET /me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = ProfileUseCase::new(state.repo.clone())
        .me(&caller.user_id)
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        data: ProfileView::from(&user),
    }))
}
