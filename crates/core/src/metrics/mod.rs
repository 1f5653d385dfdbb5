//! Metric aggregators.
//!
//! Each aggregator takes pre-grouped warehouse facts plus the season windows
//! and produces report rows in millions of won. They share the seasonal
//! split in [`split`] and the rounding and ratio helpers in [`ratio`].

pub mod cogs;
pub mod direct_cost;
pub mod end_stock;
pub mod facts;
pub mod opex;
pub mod order;
pub mod ratio;
pub mod sales;
pub mod split;
pub mod vat;


pub use cogs::{CostOfSales, ValuationTotals, aggregate_cost_of_sales};
pub use direct_cost::{
    DirectCostAmounts, DirectCostChannelRow, DirectCostLine, DirectCostReport, DirectCostRow,
    aggregate_direct_cost,
};
pub use end_stock::{EndStockReport, EndStockRow, aggregate_end_stock};
pub use facts::{CogsFact, DirectCostFact, ExpenseFact, SalesFact, StockFact};
pub use opex::{
    EtcExpenseItems, ExpenseItem, ExpenseLine, ExpenseRow, OperatingExpenseReport,
    aggregate_operating_expense, map_expense_item,
};
pub use order::{OrderAmount, aggregate_order_amount};
pub use sales::{
    ChannelCodeAmount, ChannelSalesReport, ChannelSalesRow, SalesMeasure, aggregate_sales,
};
pub use split::{Bucket, SplitTotals, bucket_for};
pub use vat::{VatChannelRow, VatExcludedReport, aggregate_vat_excluded, shipping_price};
