//! Profile Use Case
//!
//! Profile lookups scoped to the caller. Asking for any email other than
//! your own reads exactly like asking for one that does not exist.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Profile use case
pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// The caller's own profile
    pub async fn me(&self, caller: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(caller)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Profile by email, visible only to its owner
    pub async fn by_email(&self, caller: &UserId, email: &str) -> AuthResult<User> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;

        match self.user_repo.find_by_email(&email).await? {
            Some(user) if user.user_id == *caller => Ok(user),
            Some(_) => {
                tracing::warn!(caller = %caller, "Profile lookup for another user's email");
                Err(AuthError::UserNotFound)
            }
            None => Err(AuthError::UserNotFound),
        }
    }
}
