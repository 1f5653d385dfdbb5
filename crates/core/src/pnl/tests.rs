//! Tests for the P&L cascade.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::brand::RoyaltyBasis;
use crate::metrics::{CostOfSales, DirectCostAmounts, DirectCostLine};

fn full_inputs() -> PnlInputs {
    PnlInputs {
        end_stock: Some(dec!(500)),
        order_amount: Some(dec!(1000)),
        sales_rate: Some(dec!(62.5)),
        sales_tag: Some(dec!(2000)),
        actual_sales: Some(dec!(1100)),
        retail_actual_sales: Some(dec!(200)),
        vat_excluded_sales: Some(dec!(900)),
        shipping_price: Some(dec!(970)),
        cost_of_sales: Some(CostOfSales {
            cogs_base: dec!(300),
            reversal: dec!(-20),
            addition: dec!(10),
            cogs_actual: dec!(300),
            cogs_total: dec!(290),
        }),
        direct_cost: Some(DirectCostSummary {
            amounts: DirectCostAmounts {
                royalty: dec!(90),
                logistics: dec!(50),
                ..DirectCostAmounts::default()
            },
            total: dec!(140),
        }),
        operating_expense: Some(OperatingExpenseSummary {
            ad_expense: dec!(60),
            hr_cost: dec!(40),
            etc_total: dec!(30),
            self_rent: dec!(5),
            common_cost: dec!(20),
            mfc_indirect: dec!(-5),
            total: dec!(150),
        }),
    }
}

#[test]
fn test_cascade_amounts() {
    let statement = derive_statement(&full_inputs(), RoyaltyBasis::ActualSales);
    assert_eq!(statement.amount(PnlLine::CogsTotal), Some(dec!(290)));
    assert_eq!(statement.amount(PnlLine::GrossProfit), Some(dec!(610)));
    assert_eq!(statement.amount(PnlLine::DirectProfit), Some(dec!(470)));
    assert_eq!(statement.amount(PnlLine::OperatingProfit), Some(dec!(320)));
}

#[test]
fn test_percent_bases() {
    let statement = derive_statement(&full_inputs(), RoyaltyBasis::ActualSales);

    // 290 / 1100 * 1.1
    assert_eq!(statement.percent(PnlLine::CogsTotal), Some(dec!(29.0)));
    // 300 / 2000 * 1.1
    assert_eq!(statement.percent(PnlLine::Cogs), Some(dec!(16.5)));
    // -20 / 2000 * 1.1
    assert_eq!(statement.percent(PnlLine::ValuationReversal), Some(dec!(-1.1)));
    // 10 / 1100 * 1.1
    assert_eq!(statement.percent(PnlLine::ValuationAddition), Some(dec!(1.0)));
    // 970 / 1100
    assert_eq!(statement.percent(PnlLine::ShippingPrice), Some(dec!(88.2)));
    // 610 / 1100
    assert_eq!(statement.percent(PnlLine::GrossProfit), Some(dec!(55.5)));
    // 1 - 1100 / 2000
    assert_eq!(statement.percent(PnlLine::DiscountRate), Some(dec!(45.0)));
    // 60 / 1100 * 1.1
    assert_eq!(statement.percent(PnlLine::AdExpense), Some(dec!(6.0)));
    assert_eq!(statement.percent(PnlLine::OrderAmount), Some(dec!(62.5)));
    assert_eq!(statement.percent(PnlLine::EndStock), None);
}

#[test]
fn test_royalty_on_actual_sales() {
    let statement = derive_statement(&full_inputs(), RoyaltyBasis::ActualSales);
    // 90 / 1100 * 1.1
    assert_eq!(
        statement.percent(PnlLine::DirectCost(DirectCostLine::Royalty)),
        Some(dec!(9.0))
    );
}

#[test]
fn test_royalty_on_shipping_less_retail() {
    let inputs = full_inputs();
    // 970 - 0.35 * 200 = 900
    assert_eq!(
        royalty_base(&inputs, RoyaltyBasis::ShippingLessRetail),
        Some(dec!(900))
    );
    let statement = derive_statement(&inputs, RoyaltyBasis::ShippingLessRetail);
    // 90 / 900 * 1.1
    assert_eq!(
        statement.percent(PnlLine::DirectCost(DirectCostLine::Royalty)),
        Some(dec!(11.0))
    );
    // the other lines stay on actual sales: 50 / 1100 * 1.1
    assert_eq!(
        statement.percent(PnlLine::DirectCost(DirectCostLine::Logistics)),
        Some(dec!(5.0))
    );
}

#[test]
fn test_missing_inputs_degrade_dependents_to_none() {
    let mut inputs = full_inputs();
    inputs.cost_of_sales = None;
    let statement = derive_statement(&inputs, RoyaltyBasis::ActualSales);
    assert_eq!(statement.amount(PnlLine::GrossProfit), None);
    assert_eq!(statement.amount(PnlLine::DirectProfit), None);
    assert_eq!(statement.amount(PnlLine::OperatingProfit), None);
    assert_eq!(statement.amount(PnlLine::DirectCostTotal), Some(dec!(140)));
}

#[test]
fn test_zero_actual_sales_gives_no_percentages() {
    let mut inputs = full_inputs();
    inputs.actual_sales = Some(Decimal::ZERO);
    let statement = derive_statement(&inputs, RoyaltyBasis::ActualSales);
    assert_eq!(statement.percent(PnlLine::GrossProfit), None);
    assert_eq!(statement.percent(PnlLine::CogsTotal), None);
    assert_eq!(statement.percent(PnlLine::DiscountRate), Some(dec!(100.0)));
}

#[test]
fn test_statement_row_order_and_keys() {
    let statement = derive_statement(&PnlInputs::default(), RoyaltyBasis::ActualSales);
    assert_eq!(statement.rows.first().map(|r| r.key), Some("endStock"));
    assert_eq!(statement.rows.last().map(|r| r.key), Some("operatingProfit"));
    assert!(statement.rows.iter().all(|r| r.amount.is_none()));

    let json = serde_json::to_value(&statement).unwrap();
    assert_eq!(json["rows"][0]["label"], "기말재고 TAG금액");
    assert!(json["rows"][0].get("line").is_none());
}

proptest! {
    /// Feature: pnl-cascade, Property 1: gross profit plus cogs total equals VAT-excluded revenue
    #[test]
    fn prop_gross_profit_identity(
        vat in -1_000_000i64..1_000_000,
        cogs in -1_000_000i64..1_000_000,
    ) {
        let vat = Decimal::from(vat);
        let cogs = Decimal::from(cogs);
        let inputs = PnlInputs {
            vat_excluded_sales: Some(vat),
            cost_of_sales: Some(CostOfSales {
                cogs_total: cogs,
                ..CostOfSales::default()
            }),
            ..PnlInputs::default()
        };
        let statement = derive_statement(&inputs, RoyaltyBasis::ActualSales);
        let gross = statement.amount(PnlLine::GrossProfit);
        prop_assert_eq!(gross.map(|g| g + cogs), Some(vat));
    }
}
