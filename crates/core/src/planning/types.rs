//! Planning types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::season::SeasonCode;

use super::error::PlanningError;

// ============================================================================
// Simulation
// ============================================================================

/// Base-season revenue of one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelBaseline {
    /// Channel name.
    pub channel: String,
    /// Korean display name.
    #[serde(default)]
    pub channel_ko: Option<String>,
    /// Base-season revenue.
    pub base_revenue: Decimal,
}

/// Growth rate override for one channel, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelGrowth {
    /// Channel name.
    pub channel: String,
    /// Growth in percent.
    pub growth_rate: Decimal,
}

/// Base-season headline P&L used for the comparison table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselinePnl {
    /// Revenue.
    pub revenue: Decimal,
    /// Cost of sales.
    pub cogs: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Advertising expense.
    pub ad_expense: Decimal,
    /// Headcount cost.
    pub hr_cost: Decimal,
    /// Operating profit.
    pub operating_profit: Decimal,
}

fn default_growth_rate() -> Decimal {
    Decimal::from(5)
}

const fn default_true() -> bool {
    true
}

fn default_target_mu() -> Decimal {
    Decimal::from(250)
}

fn default_ad_expense() -> Decimal {
    Decimal::from(50_000)
}

fn default_headcount() -> Decimal {
    Decimal::from(100)
}

fn default_hr_cost_per_person() -> Decimal {
    Decimal::from(600)
}

/// Scenario assumptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    /// Base-season channel revenues.
    pub channels: Vec<ChannelBaseline>,
    /// Per-channel growth, used when `use_common_rate` is off. Channels
    /// without an entry do not grow.
    #[serde(default)]
    pub channel_growth_rates: Vec<ChannelGrowth>,
    /// Growth applied to every channel, in percent.
    #[serde(default = "default_growth_rate")]
    pub common_growth_rate: Decimal,
    /// Whether the common rate applies.
    #[serde(default = "default_true")]
    pub use_common_rate: bool,
    /// Target mark-up in percent (TAG over cost).
    #[serde(rename = "targetMU", default = "default_target_mu")]
    pub target_mu: Decimal,
    /// Advertising expense.
    #[serde(default = "default_ad_expense")]
    pub ad_expense: Decimal,
    /// Headcount.
    #[serde(default = "default_headcount")]
    pub headcount: Decimal,
    /// HR cost per person.
    #[serde(default = "default_hr_cost_per_person")]
    pub hr_cost_per_person: Decimal,
    /// Base-season P&L to compare against.
    #[serde(default)]
    pub baseline: Option<BaselinePnl>,
}

/// Projected revenue of one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProjection {
    /// Channel name.
    pub channel: String,
    /// Korean display name.
    pub channel_ko: Option<String>,
    /// Base-season revenue.
    pub base_revenue: Decimal,
    /// Planned revenue.
    pub plan_revenue: Decimal,
    /// Growth applied, in percent.
    pub growth_rate: Decimal,
}

/// Scenario outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Planned revenue over all channels.
    pub total_revenue: Decimal,
    /// Revenue over the target mark-up, whole units.
    pub total_cogs: Decimal,
    /// Revenue less cost of sales.
    pub gross_profit: Decimal,
    /// Gross profit over revenue, in percent.
    pub gross_profit_rate: Option<Decimal>,
    /// Advertising expense as given.
    pub ad_expense: Decimal,
    /// Headcount times cost per person.
    pub hr_cost: Decimal,
    /// Gross profit less advertising and headcount cost.
    pub operating_profit: Decimal,
    /// Operating profit over revenue, in percent.
    pub operating_profit_rate: Option<Decimal>,
    /// Per-channel projections in input order.
    pub channel_revenues: Vec<ChannelProjection>,
    /// Base versus plan, when a baseline was given.
    pub comparison: Vec<ComparisonRow>,
}

/// One line of the base versus plan table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    /// Metric label.
    pub metric: &'static str,
    /// Base-season value.
    pub base: Decimal,
    /// Planned value.
    pub plan: Decimal,
    /// `plan - base`.
    pub change: Decimal,
    /// Change over base in percent.
    pub change_rate: Option<Decimal>,
}

// ============================================================================
// Sales input
// ============================================================================

/// Channel codes used on the sales input sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanChannel {
    /// RF
    Rf,
    /// 백화점
    Dept,
    /// 플래그쉽
    Flag,
    /// 사입
    Whole,
    /// 면세점
    Df,
    /// 대리점
    Agency,
    /// 직영(가두)
    DirectStreet,
    /// 온라인(제휴)
    OnlinePartner,
    /// 온라인(직)
    OnlineDirect,
    /// 아울렛(직)
    OutletDirect,
}

impl PlanChannel {
    /// Every channel in sheet order.
    pub const ALL: [Self; 10] = [
        Self::Rf,
        Self::Dept,
        Self::Flag,
        Self::Whole,
        Self::Df,
        Self::Agency,
        Self::DirectStreet,
        Self::OnlinePartner,
        Self::OnlineDirect,
        Self::OutletDirect,
    ];

    /// Sheet code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Rf => "RF",
            Self::Dept => "DEPT",
            Self::Flag => "FLAG",
            Self::Whole => "WHOLE",
            Self::Df => "DF",
            Self::Agency => "AGENCY",
            Self::DirectStreet => "DIRECT_STREET",
            Self::OnlinePartner => "ONLINE_PARTNER",
            Self::OnlineDirect => "ONLINE_DIRECT",
            Self::OutletDirect => "OUTLET_DIRECT",
        }
    }

    /// Korean channel name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rf => "RF",
            Self::Dept => "백화점",
            Self::Flag => "플래그쉽",
            Self::Whole => "사입",
            Self::Df => "면세점",
            Self::Agency => "대리점",
            Self::DirectStreet => "직영(가두)",
            Self::OnlinePartner => "온라인(제휴)",
            Self::OnlineDirect => "온라인(직)",
            Self::OutletDirect => "아울렛(직)",
        }
    }

    /// Matches a code first, then a name, ignoring case.
    pub fn parse(value: &str) -> Result<Self, PlanningError> {
        let v = value.trim();
        Self::ALL
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(v))
            .or_else(|| Self::ALL.iter().find(|c| c.name().eq_ignore_ascii_case(v)))
            .copied()
            .ok_or_else(|| PlanningError::UnknownCode {
                kind: "channel",
                value: value.to_string(),
            })
    }
}

/// Item categories used on the sales input sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// 모자
    Head,
    /// 신발
    Shoes,
    /// 가방
    Bag,
    /// 기타악세
    Eq,
    /// 의류
    Wear,
}

impl ItemCategory {
    /// Every category in sheet order.
    pub const ALL: [Self; 5] = [Self::Head, Self::Shoes, Self::Bag, Self::Eq, Self::Wear];

    /// Sheet code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Shoes => "SHOES",
            Self::Bag => "BAG",
            Self::Eq => "EQ",
            Self::Wear => "WEAR",
        }
    }

    /// Korean category name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Head => "모자",
            Self::Shoes => "신발",
            Self::Bag => "가방",
            Self::Eq => "기타악세",
            Self::Wear => "의류",
        }
    }

    /// Matches a code first, then a name, ignoring case.
    pub fn parse(value: &str) -> Result<Self, PlanningError> {
        let v = value.trim();
        Self::ALL
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(v))
            .or_else(|| Self::ALL.iter().find(|c| c.name() == v))
            .copied()
            .ok_or_else(|| PlanningError::UnknownCode {
                kind: "category",
                value: value.to_string(),
            })
    }
}

/// One sales input line: channel x season x category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInputRow {
    /// Sheet channel.
    pub channel_code: PlanChannel,
    /// Season.
    pub season_code: SeasonCode,
    /// Item category.
    pub category_code: ItemCategory,
    /// Sales TAG in thousands of won.
    pub sales_tag_amt: Decimal,
    /// Discount in percent.
    #[serde(default)]
    pub discount_rate: Decimal,
    /// Actual sales in thousands of won. Derived from TAG and discount when
    /// absent.
    #[serde(default)]
    pub actual_sales_amt: Option<Decimal>,
}

/// Base versus plan actual sales for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPlanLine {
    /// Group code.
    pub code: String,
    /// Group display name.
    pub name: String,
    /// Base-season actual sales.
    pub base: Decimal,
    /// Planned actual sales.
    pub plan: Decimal,
    /// `plan - base`.
    pub change: Decimal,
    /// Change over base in percent, one decimal place.
    pub change_rate: Option<Decimal>,
}

/// Sales input summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPlanSummary {
    /// Per channel, sheet order.
    pub by_channel: Vec<SalesPlanLine>,
    /// Per season, chronological.
    pub by_season: Vec<SalesPlanLine>,
    /// Per item category, sheet order.
    pub by_category: Vec<SalesPlanLine>,
    /// Overall.
    pub total: SalesPlanLine,
}
