use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const CITY_MAX_LENGTH: usize = 100;

/// City (optional profile field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City(String);

impl City {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let city = raw.as_ref().trim();

        if city.is_empty() {
            return Err(AppError::bad_request("City cannot be empty")
                .with_action("Omit the field instead of sending an empty value"));
        }
        if city.chars().count() > CITY_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "City must be at most {} characters",
                CITY_MAX_LENGTH
            )));
        }
        if city.chars().any(char::is_control) {
            return Err(AppError::bad_request("City contains invalid characters"));
        }

        Ok(Self(city.to_string()))
    }

    pub fn from_db(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
