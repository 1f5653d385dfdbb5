//! Unit conversion and ratio helpers.
//!
//! All rounding is half away from zero, matching warehouse `ROUND`.
//! Every ratio returns `None` when its denominator is zero or the result
//! does not fit a decimal.

use rust_decimal::{Decimal, RoundingStrategy};

/// Won per reporting unit.
pub const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// VAT gross-up factor used for cost ratios and shipping price.
pub const VAT_FACTOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// Rounds to `dp` decimal places, half away from zero.
#[must_use]
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts won to whole millions of won.
#[must_use]
pub fn to_millions(won: Decimal) -> Decimal {
    round_dp(won / MILLION, 0)
}

/// Year-over-year index: `cy / py * 100`, whole number.
#[must_use]
pub fn yoy(cy: Decimal, py: Decimal) -> Option<Decimal> {
    cy.checked_div(py)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|index| round_dp(index, 0))
}

/// `part / base * 100 * factor`, one decimal place.
#[must_use]
pub fn percent_of(part: Decimal, base: Decimal, factor: Decimal) -> Option<Decimal> {
    part.checked_div(base)
        .and_then(|ratio| ratio.checked_mul(factor))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| round_dp(percent, 1))
}

/// Discount rate: `(1 - actual / tag) * 100`, one decimal place.
#[must_use]
pub fn discount_rate(actual: Decimal, tag: Decimal) -> Option<Decimal> {
    actual
        .checked_div(tag)
        .and_then(|ratio| Decimal::ONE.checked_sub(ratio))
        .and_then(|rest| rest.checked_mul(Decimal::ONE_HUNDRED))
        .map(|rate| round_dp(rate, 1))
}
