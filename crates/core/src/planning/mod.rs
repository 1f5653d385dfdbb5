//! Next-season planning arithmetic.
//!
//! Two calculators back the planning screens: the scenario simulation
//! (growth, mark-up and cost assumptions over a base season) and the sales
//! input summary (planned TAG and discount per channel, season and item).
//! Scenarios themselves are not persisted.

pub mod error;
pub mod sales_plan;
pub mod simulate;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::PlanningError;
pub use sales_plan::{actual_from_discount, discount_from_actual, summarize_sales_plan};
pub use simulate::{compare_with_base, simulate};
pub use types::{
    BaselinePnl, ChannelBaseline, ChannelGrowth, ChannelProjection, ComparisonRow, ItemCategory,
    PlanChannel, SalesInputRow, SalesPlanLine, SalesPlanSummary, SimulationInput,
    SimulationResult,
};
