//! Cascade derivation.

use rust_decimal::Decimal;

use crate::brand::RoyaltyBasis;
use crate::metrics::DirectCostLine;
use crate::metrics::ratio::{VAT_FACTOR, discount_rate, percent_of};

use super::types::{PnlInputs, PnlLine, PnlRow, PnlStatement};

/// Share of retail actual sales taken off the shipping price in the royalty
/// basis.
pub const SHIPPING_RETAIL_SHARE: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

/// Base the royalty percentage is measured against.
#[must_use]
pub fn royalty_base(inputs: &PnlInputs, basis: RoyaltyBasis) -> Option<Decimal> {
    match basis {
        RoyaltyBasis::ShippingLessRetail => {
            Some(inputs.shipping_price? - SHIPPING_RETAIL_SHARE * inputs.retail_actual_sales?)
        }
        RoyaltyBasis::ActualSales => inputs.actual_sales,
    }
}

fn pct(part: Option<Decimal>, base: Option<Decimal>, factor: Decimal) -> Option<Decimal> {
    percent_of(part?, base?, factor)
}

/// Derives the statement.
///
/// `grossProfit = vatExcludedSales - cogsTotal`, then direct costs and
/// operating expenses come off in turn. Cost lines are measured against
/// actual sales grossed up by VAT, profit margins against actual sales as is.
#[must_use]
pub fn derive_statement(inputs: &PnlInputs, basis: RoyaltyBasis) -> PnlStatement {
    let actual = inputs.actual_sales;
    let tag = inputs.sales_tag;
    let cost = inputs.cost_of_sales;
    let direct = inputs.direct_cost;
    let opex = inputs.operating_expense;

    let cogs_total = cost.map(|c| c.cogs_total);
    let gross_profit = inputs.vat_excluded_sales.zip(cogs_total).map(|(v, c)| v - c);
    let direct_total = direct.map(|d| d.total);
    let direct_profit = gross_profit.zip(direct_total).map(|(g, d)| g - d);
    let opex_total = opex.map(|o| o.total);
    let operating_profit = direct_profit.zip(opex_total).map(|(d, o)| d - o);

    let cost_row = |line: PnlLine, amount: Option<Decimal>| {
        PnlRow::new(line, amount, pct(amount, actual, VAT_FACTOR))
    };
    let margin_row = |line: PnlLine, amount: Option<Decimal>| {
        PnlRow::new(line, amount, pct(amount, actual, Decimal::ONE))
    };

    let mut rows = vec![
        PnlRow::new(PnlLine::EndStock, inputs.end_stock, None),
        PnlRow::new(PnlLine::OrderAmount, inputs.order_amount, inputs.sales_rate),
        PnlRow::new(PnlLine::SalesTag, tag, None),
        PnlRow::new(PnlLine::ActualSales, actual, None),
        PnlRow::new(
            PnlLine::DiscountRate,
            None,
            actual.zip(tag).and_then(|(a, t)| discount_rate(a, t)),
        ),
        PnlRow::new(PnlLine::VatExcludedSales, inputs.vat_excluded_sales, None),
        margin_row(PnlLine::ShippingPrice, inputs.shipping_price),
        PnlRow::new(
            PnlLine::Cogs,
            cost.map(|c| c.cogs_actual),
            pct(cost.map(|c| c.cogs_actual), tag, VAT_FACTOR),
        ),
        PnlRow::new(
            PnlLine::ValuationReversal,
            cost.map(|c| c.reversal),
            pct(cost.map(|c| c.reversal), tag, VAT_FACTOR),
        ),
        cost_row(PnlLine::ValuationAddition, cost.map(|c| c.addition)),
        cost_row(PnlLine::CogsTotal, cogs_total),
        margin_row(PnlLine::GrossProfit, gross_profit),
    ];

    for line in DirectCostLine::ALL {
        let amount = direct.map(|d| d.amounts.get(line));
        let row = if line == DirectCostLine::Royalty {
            PnlRow::new(
                PnlLine::DirectCost(line),
                amount,
                pct(amount, royalty_base(inputs, basis), VAT_FACTOR),
            )
        } else {
            cost_row(PnlLine::DirectCost(line), amount)
        };
        rows.push(row);
    }

    rows.extend([
        cost_row(PnlLine::DirectCostTotal, direct_total),
        margin_row(PnlLine::DirectProfit, direct_profit),
        cost_row(PnlLine::AdExpense, opex.map(|o| o.ad_expense)),
        cost_row(PnlLine::HrCost, opex.map(|o| o.hr_cost)),
        cost_row(PnlLine::EtcExpense, opex.map(|o| o.etc_total)),
        cost_row(PnlLine::SelfRent, opex.map(|o| o.self_rent)),
        cost_row(PnlLine::CommonCost, opex.map(|o| o.common_cost)),
        cost_row(PnlLine::MfcIndirect, opex.map(|o| o.mfc_indirect)),
        cost_row(PnlLine::OperatingExpenseTotal, opex_total),
        margin_row(PnlLine::OperatingProfit, operating_profit),
    ]);

    PnlStatement { rows }
}
