//! City search value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Free-text city query, matched by the provider server-side
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct City(String);

impl City {
    /// Parse a search string into a city
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCity` if the input is empty after trimming.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCity(input.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the city as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for City {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let city = City::parse("  Austin ").unwrap();
        assert_eq!(city.as_str(), "Austin");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(City::parse("").is_err());
        assert!(City::parse("   \t").is_err());
    }

    #[test]
    fn keeps_inner_spaces() {
        let city = City::parse("San Francisco").unwrap();
        assert_eq!(city.to_string(), "San Francisco");
    }

    #[test]
    fn deserialize_validates() {
        let ok: City = serde_json::from_str("\"Oslo\"").unwrap();
        assert_eq!(ok.as_str(), "Oslo");
        assert!(serde_json::from_str::<City>("\"  \"").is_err());
    }
}
