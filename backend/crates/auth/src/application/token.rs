//! Access token issuance and verification for users

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Mint an access token for `user_id`
pub fn issue_token(config: &AuthConfig, user_id: &UserId) -> AuthResult<String> {
    config
        .token_keys
        .issue(&user_id.to_string(), config.token_ttl_chrono(), Utc::now())
        .map_err(AuthError::TokenIssue)
}

/// Resolve a bearer token to the user it was issued for
pub fn authenticate(config: &AuthConfig, token: &str) -> AuthResult<UserId> {
    authenticate_at(config, token, Utc::now())
}

/// [`authenticate`] against an explicit clock
pub fn authenticate_at(config: &AuthConfig, token: &str, now: DateTime<Utc>) -> AuthResult<UserId> {
    let claims = config
        .token_keys
        .verify(token, now)
        .map_err(AuthError::InvalidToken)?;

    // A correctly signed token always carries a UUID subject
    claims
        .sub
        .parse::<UserId>()
        .map_err(|_| AuthError::InvalidToken(platform::token::TokenError::Malformed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::token::TokenError;

    #[test]
    fn test_token_resolves_to_user() {
        let config = AuthConfig::development().unwrap();
        let user_id = UserId::new();
        let token = issue_token(&config, &user_id).unwrap();

        assert_eq!(authenticate(&config, &token).unwrap(), user_id);
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let config = AuthConfig::development().unwrap();
        let user_id = UserId::new();
        let token = issue_token(&config, &user_id).unwrap();

        let later = Utc::now() + chrono::Duration::hours(24) + chrono::Duration::seconds(1);
        assert!(matches!(
            authenticate_at(&config, &token, later),
            Err(AuthError::InvalidToken(TokenError::Expired))
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let config = AuthConfig::development().unwrap();
        let other = AuthConfig::development().unwrap();
        let token = issue_token(&other, &UserId::new()).unwrap();

        assert!(matches!(
            authenticate(&config, &token),
            Err(AuthError::InvalidToken(TokenError::InvalidSignature))
        ));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let config = AuthConfig::development().unwrap();
        let token = config
            .token_keys
            .issue("not-a-uuid", chrono::Duration::hours(1), Utc::now())
            .unwrap();

        assert!(matches!(
            authenticate(&config, &token),
            Err(AuthError::InvalidToken(TokenError::Malformed))
        ));
    }
}
