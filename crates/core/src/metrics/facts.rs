//! Warehouse fact rows.
//!
//! Facts arrive grouped by month, channel identifiers and product attributes,
//! which is everything the classifier and normalizer need.

use rust_decimal::Decimal;

use crate::catalog::ProductAttributes;
use crate::channel::ChannelKey;
use crate::season::YearMonth;

use super::direct_cost::DirectCostAmounts;

/// Monthly sales amounts in won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesFact {
    /// Posting month.
    pub month: YearMonth,
    /// Channel identifiers.
    pub channel: ChannelKey,
    /// Product attributes.
    pub product: ProductAttributes,
    /// Sales at TAG (list) price.
    pub tag_amount: Decimal,
    /// Sales at actual price.
    pub actual_amount: Decimal,
    /// VAT-excluded sales net of distribution commission.
    pub vat_excluded_amount: Decimal,
}

/// Monthly direct costs in won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectCostFact {
    /// Posting month.
    pub month: YearMonth,
    /// Channel identifiers.
    pub channel: ChannelKey,
    /// Product attributes.
    pub product: ProductAttributes,
    /// Cost columns.
    pub amounts: DirectCostAmounts,
}

/// Monthly cost of goods sold in won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CogsFact {
    /// Posting month.
    pub month: YearMonth,
    /// Raw channel code.
    pub raw_code: Option<String>,
    /// Product attributes.
    pub product: ProductAttributes,
    /// Actual COGS.
    pub amount: Decimal,
}

/// End-of-month stock at TAG price in won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockFact {
    /// Season recorded on the stock row.
    pub stock_season: String,
    /// Product attributes, absent when the product is not in the catalog.
    pub product: Option<ProductAttributes>,
    /// End-of-month stock TAG amount.
    pub amount: Decimal,
}

/// Monthly cost-center expense in won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFact {
    /// Posting month.
    pub month: YearMonth,
    /// Expense category level 1.
    pub category1: Option<String>,
    /// Expense category level 2.
    pub category2: Option<String>,
    /// Total used amount.
    pub total_amount: Decimal,
    /// Amount used by manufacturing departments.
    pub manufacturing_amount: Decimal,
}
