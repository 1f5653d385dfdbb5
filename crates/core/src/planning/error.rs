//! Planning error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Planning input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanningError {
    /// Target mark-up must be positive.
    #[error("Target mark-up must be greater than zero, got {0}")]
    InvalidMarkup(Decimal),

    /// A cost or headcount input was negative.
    #[error("{0} must not be negative")]
    NegativeInput(&'static str),

    /// Discount rate outside 0-100.
    #[error("Discount rate must be between 0 and 100, got {0}")]
    InvalidDiscountRate(Decimal),

    /// A calculated figure does not fit a decimal.
    #[error("{0} is too large to calculate")]
    Overflow(&'static str),

    /// Channel or category label that does not map to a plan code.
    #[error("Unknown {kind}: {value}")]
    UnknownCode {
        /// What was being looked up.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}
