//! Register Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    city::City,
    display_name::DisplayName,
    email::Email,
    phone_number::PhoneNumber,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use kernel::error::app_error::AppError;

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub city: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate every field before touching the store
        let name = DisplayName::new(&input.name)
            .map_err(|e| AppError::bad_request(e.to_string()).with_action("Please enter your name"))?;
        let email = Email::new(&input.email)?;
        let phone_number = input
            .phone_number
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PhoneNumber::new)
            .transpose()?;
        let city = input
            .city
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(City::new)
            .transpose()?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(raw_password, &self.config.hashing).await?;

        let user = User::new(email, name, password_hash, phone_number, city);

        // Unique index catches a concurrent registration of the same email
        self.user_repo.create(&user).await?;

        let token = issue_token(&self.config, &user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput { token, user })
    }
}
