//! Domain Value Objects

use std::fmt;

use crate::error::{PaymentError, PaymentResult};

/// Positive amount in the smallest currency unit (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(i64);

impl Amount {
    pub fn new(cents: i64) -> PaymentResult<Self> {
        if cents > 0 {
            Ok(Self(cents))
        } else {
            Err(PaymentError::InvalidAmount)
        }
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

/// Lower-case ISO 4217 code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency(String);

impl Currency {
    pub fn parse(raw: &str) -> PaymentResult<Self> {
        let code = raw.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_lowercase()))
        } else {
            Err(PaymentError::InvalidCurrency)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self("usd".to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-use token for a card or other payment source, issued client-side
/// by the processor
#[derive(Clone, PartialEq, Eq)]
pub struct SourceToken(String);

impl SourceToken {
    pub fn new(raw: &str) -> PaymentResult<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(PaymentError::MissingSource);
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SourceToken").field(&"[REDACTED]").finish()
    }
}
