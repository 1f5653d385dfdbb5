//! Brand code newtype.
//!
//! Brand codes are short uppercase identifiers (`M`, `I`, `X`, `V`, `ST`) that
//! end up as bound parameters in warehouse statements. Validation happens once,
//! at the edge, so downstream code never sees arbitrary text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a brand code.
const MAX_LEN: usize = 3;

/// Error returned when a brand code fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid brand code '{0}': expected 1-3 uppercase letters or digits")]
pub struct BrandCodeError(pub String);

/// A validated brand code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BrandCode(String);

impl BrandCode {
    /// Parses and validates a brand code.
    pub fn parse(raw: &str) -> Result<Self, BrandCodeError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= MAX_LEN
            && trimmed
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(BrandCodeError(raw.to_string()))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BrandCode {
    /// MLB is the default brand across every report.
    fn default() -> Self {
        Self("M".to_string())
    }
}

impl fmt::Display for BrandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BrandCode {
    type Error = BrandCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BrandCode> for String {
    fn from(code: BrandCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("M")]
    #[case("I")]
    #[case("ST")]
    #[case(" X ")]
    fn test_valid_codes(#[case] raw: &str) {
        let code = BrandCode::parse(raw).unwrap();
        assert_eq!(code.as_str(), raw.trim());
    }

    #[rstest]
    #[case("")]
    #[case("m")]
    #[case("MLBX")]
    #[case("M'; drop table x;--")]
    #[case("M-1")]
    fn test_invalid_codes(#[case] raw: &str) {
        assert!(BrandCode::parse(raw).is_err());
    }

    #[test]
    fn test_default_is_mlb() {
        assert_eq!(BrandCode::default().as_str(), "M");
    }

    #[test]
    fn test_serde_validates() {
        let code: BrandCode = serde_json::from_str("\"ST\"").unwrap();
        assert_eq!(code.to_string(), "ST");
        assert!(serde_json::from_str::<BrandCode>("\"st\"").is_err());
    }
}
