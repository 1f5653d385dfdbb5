//! P&L cascade.
//!
//! Takes the per-report totals (in millions of won) for one brand and season
//! and derives gross, direct and operating profit plus the percent-of-revenue
//! column. A missing input leaves every value that depends on it empty.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{SHIPPING_RETAIL_SHARE, derive_statement, royalty_base};
pub use types::{
    DirectCostSummary, OperatingExpenseSummary, PnlInputs, PnlLine, PnlRow, PnlStatement,
};
