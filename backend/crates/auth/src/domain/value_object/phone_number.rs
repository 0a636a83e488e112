//! Phone Number Value Object
//!
//! Optional profile field. Stored in a compact form: an optional leading
//! `+` followed by digits only.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15; // E.164

/// Phone number value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a phone number, dropping spaces, dashes, dots and parentheses
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let raw = raw.as_ref().trim();
        let (plus, rest) = match raw.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => {
                    return Err(AppError::bad_request("Invalid phone number format")
                        .with_action("Use digits, optionally starting with '+'"));
                }
            }
        }

        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(AppError::bad_request(format!(
                "Phone number must have {} to {} digits",
                MIN_DIGITS, MAX_DIGITS
            )));
        }

        Ok(Self(if plus { format!("+{digits}") } else { digits }))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_compacted() {
        assert_eq!(PhoneNumber::new("+1 (555) 010-9999").unwrap().as_str(), "+15550109999");
        assert_eq!(PhoneNumber::new("090-1234-5678").unwrap().as_str(), "09012345678");
    }

    #[test]
    fn test_phone_invalid() {
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("12345").is_err());
        assert!(PhoneNumber::new("1234567890123456").is_err());
        assert!(PhoneNumber::new("555-CALL-NOW").is_err());
        assert!(PhoneNumber::new("++15550109999").is_err());
    }
}
