//! Cost of sales.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::classify;
use crate::channel::is_reportable;
use crate::season::SeasonWindow;

use super::facts::CogsFact;
use super::ratio::to_millions;
use super::split::{SplitTotals, bucket_for};

/// Inventory revaluation sums over the season dates, in won.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValuationTotals {
    /// Revaluation reversal (환입).
    pub reversal: Decimal,
    /// Revaluation addition (추가).
    pub addition: Decimal,
}

/// Cost-of-sales breakdown in millions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfSales {
    /// COGS before revaluation.
    pub cogs_base: Decimal,
    /// Revaluation reversal.
    #[serde(rename = "stkAsstAprctAmt")]
    pub reversal: Decimal,
    /// Revaluation addition.
    #[serde(rename = "vltnAmt")]
    pub addition: Decimal,
    /// Reported COGS.
    pub cogs_actual: Decimal,
    /// `cogs_actual + reversal + addition`.
    pub cogs_total: Decimal,
}

/// Builds the cost-of-sales breakdown.
///
/// COGS goes through the seasonal split with each bucket rounded to millions
/// before the two are added.
#[must_use]
pub fn aggregate_cost_of_sales(
    facts: &[CogsFact],
    valuation: ValuationTotals,
    window: &SeasonWindow,
) -> CostOfSales {
    let mut split = SplitTotals::default();
    for fact in facts
        .iter()
        .filter(|fact| is_reportable(fact.raw_code.as_deref()))
    {
        let bucket = bucket_for(classify(&fact.product, window), fact.month, window);
        split.add(bucket, fact.amount);
    }

    let cogs_base = split.counted_millions_by_bucket();
    let reversal = to_millions(valuation.reversal);
    let addition = to_millions(valuation.addition);

    CostOfSales {
        cogs_base,
        reversal,
        addition,
        cogs_actual: cogs_base,
        cogs_total: cogs_base + reversal + addition,
    }
}
