//! Scenario simulation.
//!
//! Inputs are unbounded. Every figure uses checked arithmetic and an
//! overflow surfaces as [`PlanningError::Overflow`].

use rust_decimal::Decimal;

use crate::metrics::ratio::{percent_of, round_dp};

use super::error::PlanningError;
use super::types::{
    BaselinePnl, ChannelBaseline, ChannelProjection, ComparisonRow, SimulationInput,
    SimulationResult,
};

/// Unwraps a checked result, naming the figure that overflowed.
pub(crate) fn in_range(
    value: Option<Decimal>,
    figure: &'static str,
) -> Result<Decimal, PlanningError> {
    value.ok_or(PlanningError::Overflow(figure))
}

/// `(plan - base) / base * 100`, one decimal place. Undefined for a
/// non-positive base or a rate too large to represent.
pub(crate) fn change_rate(base: Decimal, plan: Decimal) -> Option<Decimal> {
    if base <= Decimal::ZERO {
        return None;
    }
    plan.checked_sub(base)
        .and_then(|diff| diff.checked_div(base))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|rate| round_dp(rate, 1))
}

fn validate(input: &SimulationInput) -> Result<(), PlanningError> {
    if input.target_mu <= Decimal::ZERO {
        return Err(PlanningError::InvalidMarkup(input.target_mu));
    }
    if input.ad_expense.is_sign_negative() {
        return Err(PlanningError::NegativeInput("adExpense"));
    }
    if input.headcount.is_sign_negative() {
        return Err(PlanningError::NegativeInput("headcount"));
    }
    if input.hr_cost_per_person.is_sign_negative() {
        return Err(PlanningError::NegativeInput("hrCostPerPerson"));
    }
    Ok(())
}

fn growth_rate_for(input: &SimulationInput, channel: &ChannelBaseline) -> Decimal {
    if input.use_common_rate {
        input.common_growth_rate
    } else {
        input
            .channel_growth_rates
            .iter()
            .find(|g| g.channel == channel.channel)
            .map_or(Decimal::ZERO, |g| g.growth_rate)
    }
}

fn project(
    channel: &ChannelBaseline,
    growth_rate: Decimal,
) -> Result<ChannelProjection, PlanningError> {
    let plan_revenue = growth_rate
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|growth| Decimal::ONE.checked_add(growth))
        .and_then(|factor| channel.base_revenue.checked_mul(factor))
        .map(|revenue| round_dp(revenue, 0));

    Ok(ChannelProjection {
        channel: channel.channel.clone(),
        channel_ko: channel.channel_ko.clone(),
        base_revenue: channel.base_revenue,
        plan_revenue: in_range(plan_revenue, "planRevenue")?,
        growth_rate,
    })
}

/// Projects next-season P&L from base revenues and assumptions.
///
/// Revenue grows per channel, cost of sales follows from the target mark-up
/// and operating profit is gross profit less advertising and headcount cost.
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, PlanningError> {
    validate(input)?;

    let channel_revenues = input
        .channels
        .iter()
        .map(|ch| project(ch, growth_rate_for(input, ch)))
        .collect::<Result<Vec<_>, _>>()?;

    let total_revenue = channel_revenues
        .iter()
        .try_fold(Decimal::ZERO, |total, ch| {
            in_range(total.checked_add(ch.plan_revenue), "totalRevenue")
        })?;
    let total_cogs = in_range(
        total_revenue
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(input.target_mu))
            .map(|cogs| round_dp(cogs, 0)),
        "totalCogs",
    )?;
    let gross_profit = in_range(total_revenue.checked_sub(total_cogs), "grossProfit")?;
    let hr_cost = in_range(
        input.headcount.checked_mul(input.hr_cost_per_person),
        "hrCost",
    )?;
    let operating_profit = in_range(
        gross_profit
            .checked_sub(input.ad_expense)
            .and_then(|profit| profit.checked_sub(hr_cost)),
        "operatingProfit",
    )?;

    let mut result = SimulationResult {
        total_revenue,
        total_cogs,
        gross_profit,
        gross_profit_rate: percent_of(gross_profit, total_revenue, Decimal::ONE),
        ad_expense: input.ad_expense,
        hr_cost,
        operating_profit,
        operating_profit_rate: percent_of(operating_profit, total_revenue, Decimal::ONE),
        channel_revenues,
        comparison: Vec::new(),
    };

    if let Some(base) = &input.baseline {
        result.comparison = compare_with_base(base, &result)?;
    }

    Ok(result)
}

/// Lines up the headline figures of a base season and a simulated plan.
pub fn compare_with_base(
    base: &BaselinePnl,
    plan: &SimulationResult,
) -> Result<Vec<ComparisonRow>, PlanningError> {
    [
        ("매출", base.revenue, plan.total_revenue),
        ("매출원가", base.cogs, plan.total_cogs),
        ("매출총이익", base.gross_profit, plan.gross_profit),
        ("광고선전비", base.ad_expense, plan.ad_expense),
        ("인건비", base.hr_cost, plan.hr_cost),
        ("영업이익", base.operating_profit, plan.operating_profit),
    ]
    .into_iter()
    .map(|(metric, base, plan)| {
        Ok(ComparisonRow {
            metric,
            base,
            plan,
            change: in_range(plan.checked_sub(base), "change")?,
            change_rate: change_rate(base, plan),
        })
    })
    .collect()
}
