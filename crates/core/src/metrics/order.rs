//! Order amount and sell-through for current-season apparel.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{ItemClass, ProductAttributes, classify};
use crate::channel::is_reportable;
use crate::season::SeasonWindow;

use super::facts::{SalesFact, StockFact};
use super::ratio::{percent_of, to_millions};

/// Order amount in millions: what was left at season end plus what sold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAmount {
    /// Current-season apparel stock TAG at `period_end`.
    pub end_stock_tag_amt: Decimal,
    /// Current-season apparel sales TAG.
    pub sales_tag_amt: Decimal,
    /// `end_stock_tag_amt + sales_tag_amt`, rounded from won.
    pub order_amt: Decimal,
    /// Sales TAG share of the order amount, one decimal place.
    pub sales_rate: Option<Decimal>,
}

/// Derives the order amount from stock at `period_end` and sales facts.
///
/// Only current-season apparel counts on either side. Sales are taken from
/// `current_season_start..=period_end` and only on reportable channels.
#[must_use]
pub fn aggregate_order_amount(
    stock: &[StockFact],
    sales: &[SalesFact],
    window: &SeasonWindow,
) -> OrderAmount {
    let is_current =
        |product: &ProductAttributes| classify(product, window) == ItemClass::CurrentApparel;

    let end_stock: Decimal = stock
        .iter()
        .filter(|fact| fact.product.as_ref().is_some_and(is_current))
        .map(|fact| fact.amount)
        .sum();

    let sales_tag: Decimal = sales
        .iter()
        .filter(|fact| is_reportable(fact.channel.raw_code.as_deref()))
        .filter(|fact| window.in_current_season_range(fact.month))
        .filter(|fact| is_current(&fact.product))
        .map(|fact| fact.tag_amount)
        .sum();

    let order = end_stock + sales_tag;
    OrderAmount {
        end_stock_tag_amt: to_millions(end_stock),
        sales_tag_amt: to_millions(sales_tag),
        order_amt: to_millions(order),
        sales_rate: percent_of(sales_tag, order, Decimal::ONE),
    }
}
