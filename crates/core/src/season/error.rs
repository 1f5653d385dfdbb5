//! Season error types.

use thiserror::Error;

/// Errors raised while parsing season codes or months.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonError {
    /// Season code is not two digits followed by S, F or N.
    #[error("Invalid season code '{0}': expected two digits followed by S, F or N")]
    InvalidSeasonCode(String),

    /// Month value is not a valid `YYYYMM`.
    #[error("Invalid year-month '{0}': expected YYYYMM")]
    InvalidYearMonth(String),
}
