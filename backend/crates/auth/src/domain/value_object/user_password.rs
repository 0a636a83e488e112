//! User Password Value Object
//!
//! Domain wrapper over `platform::password`: policy violations become
//! user-facing 400s, and hashing/verification run off the async workers.
//!
//! ## Usage
//! ```rust,ignore
//! let raw = RawPassword::new("secret1".to_string())?;
//! let hashed = UserPassword::from_raw(raw, &config.hashing).await?;
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, HashingConfig, PasswordHashError, PasswordPolicyError,
    spawn_hash, spawn_verify,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the password policy
    ///
    /// ## Errors
    /// Returns a 400 `AppError` with a user-facing message
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("Password must be at least {} characters", min))
                    .with_action("Please choose a longer password")
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {} characters", max))
                    .with_action("Please choose a shorter password")
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    fn into_inner(self) -> ClearTextPassword {
        self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

/// Argon2id PHC hash stored for a user
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated password on the blocking pool
    pub async fn from_raw(
        raw: RawPassword,
        config: &HashingConfig,
    ) -> Result<Self, PasswordHashError> {
        spawn_hash(raw.into_inner(), config.clone()).await.map(Self)
    }

    /// Load a PHC string from storage
    pub fn from_db(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    /// Verify on the blocking pool; any failure reads as a mismatch
    pub async fn verify(&self, raw: RawPassword, config: &HashingConfig) -> bool {
        spawn_verify(raw.into_inner(), self.0.clone(), config.clone()).await
    }

    /// PHC string for storage
    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}
