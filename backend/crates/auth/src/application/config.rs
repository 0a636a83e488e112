//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::{ClearTextPassword, HashedPassword, HashingConfig};
use platform::token::TokenKeys;

use crate::error::{AuthError, AuthResult};

/// Default access token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Longest accepted access token lifetime (30 days)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Verified against when the email is unknown, so a miss costs one hash
const TIMING_DUMMY_PASSWORD: &str = "timing-equalizer-password";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing/verification keys
    pub token_keys: TokenKeys,
    /// Access token lifetime
    pub token_ttl: Duration,
    /// Argon2id cost and optional pepper
    pub hashing: HashingConfig,
    dummy_hash: HashedPassword,
}

impl AuthConfig {
    /// Build a config; hashes the timing dummy once under `hashing`
    ///
    /// `token_ttl` must be at least one second and at most [`MAX_TOKEN_TTL`].
    pub fn new(token_keys: TokenKeys, token_ttl: Duration, hashing: HashingConfig) -> AuthResult<Self> {
        if token_ttl < Duration::from_secs(1) || token_ttl > MAX_TOKEN_TTL {
            return Err(AuthError::Internal(format!(
                "Token TTL must be between 1 and {} seconds (got {})",
                MAX_TOKEN_TTL.as_secs(),
                token_ttl.as_secs()
            )));
        }

        let dummy = ClearTextPassword::new(TIMING_DUMMY_PASSWORD.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let dummy_hash = dummy.hash(&hashing)?;

        Ok(Self {
            token_keys,
            token_ttl,
            hashing,
            dummy_hash,
        })
    }

    /// Config with a random signing secret (development and tests)
    pub fn development() -> AuthResult<Self> {
        Self::new(TokenKeys::random(), DEFAULT_TOKEN_TTL, HashingConfig::default())
    }

    /// Token TTL as a chrono duration for claim arithmetic
    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        // Bounded by MAX_TOKEN_TTL in `new`
        chrono::Duration::from_std(self.token_ttl).unwrap_or(chrono::Duration::zero())
    }

    pub(crate) fn dummy_hash(&self) -> &HashedPassword {
        &self.dummy_hash
    }
}
