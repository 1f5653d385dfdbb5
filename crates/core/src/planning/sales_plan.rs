//! Sales input arithmetic.
//!
//! TAG and actual amounts are unbounded; sums and differences are checked.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::metrics::ratio::round_dp;

use super::error::PlanningError;
use super::simulate::{change_rate, in_range};
use super::types::{ItemCategory, PlanChannel, SalesInputRow, SalesPlanLine, SalesPlanSummary};

fn check_discount(rate: Decimal) -> Result<(), PlanningError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(PlanningError::InvalidDiscountRate(rate));
    }
    Ok(())
}

/// Actual sales implied by a TAG amount and a discount rate, whole units.
pub fn actual_from_discount(
    tag: Decimal,
    discount_rate: Decimal,
) -> Result<Decimal, PlanningError> {
    check_discount(discount_rate)?;
    let factor = Decimal::ONE - discount_rate / Decimal::ONE_HUNDRED;
    in_range(
        tag.checked_mul(factor).map(|actual| round_dp(actual, 0)),
        "actualSalesAmt",
    )
}

/// Discount rate implied by a TAG amount and actual sales, one decimal
/// place. Zero when there is no TAG.
pub fn discount_from_actual(tag: Decimal, actual: Decimal) -> Result<Decimal, PlanningError> {
    if tag.is_zero() {
        return Ok(Decimal::ZERO);
    }
    in_range(
        actual
            .checked_div(tag)
            .and_then(|ratio| Decimal::ONE.checked_sub(ratio))
            .and_then(|rest| rest.checked_mul(Decimal::ONE_HUNDRED))
            .map(|rate| round_dp(rate, 1)),
        "discountRate",
    )
}

fn actual_of(row: &SalesInputRow) -> Result<Decimal, PlanningError> {
    match row.actual_sales_amt {
        Some(actual) => Ok(actual),
        None => actual_from_discount(row.sales_tag_amt, row.discount_rate),
    }
}

#[derive(Default)]
struct Totals {
    base: Decimal,
    plan: Decimal,
}

fn accumulate<K: Ord + Copy>(
    rows: &[SalesInputRow],
    key: impl Fn(&SalesInputRow) -> K,
    into: &mut BTreeMap<K, Totals>,
    plan: bool,
) -> Result<(), PlanningError> {
    for row in rows {
        let actual = actual_of(row)?;
        let entry = into.entry(key(row)).or_default();
        if plan {
            entry.plan = in_range(entry.plan.checked_add(actual), "plan")?;
        } else {
            entry.base = in_range(entry.base.checked_add(actual), "base")?;
        }
    }
    Ok(())
}

fn group<K: Ord + Copy>(
    base: &[SalesInputRow],
    plan: &[SalesInputRow],
    key: impl Fn(&SalesInputRow) -> K,
) -> Result<BTreeMap<K, Totals>, PlanningError> {
    let mut totals = BTreeMap::new();
    accumulate(base, &key, &mut totals, false)?;
    accumulate(plan, &key, &mut totals, true)?;
    Ok(totals)
}

fn line(code: String, name: String, totals: &Totals) -> Result<SalesPlanLine, PlanningError> {
    Ok(SalesPlanLine {
        code,
        name,
        base: totals.base,
        plan: totals.plan,
        change: in_range(totals.plan.checked_sub(totals.base), "change")?,
        change_rate: change_rate(totals.base, totals.plan),
    })
}

/// Summarizes base-season and planned actual sales by channel, season and
/// item category.
///
/// Rows without actual sales are priced from TAG and discount. Groups that
/// appear on only one side still get a line with zero on the other.
pub fn summarize_sales_plan(
    base: &[SalesInputRow],
    plan: &[SalesInputRow],
) -> Result<SalesPlanSummary, PlanningError> {
    let by_channel = group(base, plan, |r| r.channel_code)?
        .iter()
        .map(|(ch, t): (&PlanChannel, &Totals)| {
            line(ch.code().to_string(), ch.name().to_string(), t)
        })
        .collect::<Result<_, _>>()?;

    let by_season = group(base, plan, |r| r.season_code)?
        .iter()
        .map(|(season, t)| line(season.to_string(), season.to_string(), t))
        .collect::<Result<_, _>>()?;

    let by_category = group(base, plan, |r| r.category_code)?
        .iter()
        .map(|(cat, t): (&ItemCategory, &Totals)| {
            line(cat.code().to_string(), cat.name().to_string(), t)
        })
        .collect::<Result<_, _>>()?;

    let mut total = Totals::default();
    for row in base {
        total.base = in_range(total.base.checked_add(actual_of(row)?), "base")?;
    }
    for row in plan {
        total.plan = in_range(total.plan.checked_add(actual_of(row)?), "plan")?;
    }

    Ok(SalesPlanSummary {
        by_channel,
        by_season,
        by_category,
        total: line("TOTAL".to_string(), "합계".to_string(), &total)?,
    })
}
