//! Login Use Case
//!
//! Authenticates a user by email and password and issues an access token.
//! Every failure collapses to `AuthError::InvalidCredentials`; a miss on the
//! email still pays for one hash verification.

use std::sync::Arc;

use platform::password::{ClearTextPassword, spawn_verify};

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = match Email::new(&input.email) {
            Ok(email) => self.user_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let raw_password = RawPassword::new(input.password);

        let Some(user) = user else {
            self.burn_dummy_verify().await;
            return Err(AuthError::InvalidCredentials);
        };

        // A password that fails policy can never match a stored hash
        let Ok(raw_password) = raw_password else {
            self.burn_dummy_verify().await;
            return Err(AuthError::InvalidCredentials);
        };

        if !user
            .password_hash
            .verify(raw_password, &self.config.hashing)
            .await
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(&self.config, &user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token, user })
    }

    async fn burn_dummy_verify(&self) {
        if let Ok(dummy) = ClearTextPassword::new("not-the-dummy-password".to_string()) {
            let _ = spawn_verify(
                dummy,
                self.config.dummy_hash().clone(),
                self.config.hashing.clone(),
            )
            .await;
        }
    }
}
