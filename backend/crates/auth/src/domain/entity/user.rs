//! User Entity
//!
//! Account identity plus the optional profile fields collected at
//! registration. The password hash never leaves this crate except to the
//! credential store.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    city::City, display_name::DisplayName, email::Email, phone_number::PhoneNumber,
    user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (token subject)
    pub user_id: UserId,
    /// Login identifier, unique and lower-cased
    pub email: Email,
    /// Display name
    pub name: DisplayName,
    /// Argon2id PHC hash
    pub password_hash: UserPassword,
    pub phone_number: Option<PhoneNumber>,
    pub city: Option<City>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        email: Email,
        name: DisplayName,
        password_hash: UserPassword,
        phone_number: Option<PhoneNumber>,
        city: Option<City>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            name,
            password_hash,
            phone_number,
            city,
            created_at: now,
            updated_at: now,
        }
    }
}
