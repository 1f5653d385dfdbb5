//! P&L types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::metrics::{
    CostOfSales, DirectCostAmounts, DirectCostLine, DirectCostReport, OperatingExpenseReport,
};

/// Direct cost totals in millions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectCostSummary {
    /// Per-line totals.
    pub amounts: DirectCostAmounts,
    /// Sum of the lines.
    pub total: Decimal,
}

impl From<&DirectCostReport> for DirectCostSummary {
    fn from(report: &DirectCostReport) -> Self {
        Self {
            amounts: report.totals,
            total: report.total,
        }
    }
}

/// Operating expense headline lines in millions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingExpenseSummary {
    /// 광고비
    pub ad_expense: Decimal,
    /// 인건비
    pub hr_cost: Decimal,
    /// 기타영업비
    pub etc_total: Decimal,
    /// 자가임차료
    pub self_rent: Decimal,
    /// 공통비 배부
    pub common_cost: Decimal,
    /// 제조간접비 차감
    pub mfc_indirect: Decimal,
    /// 영업비 합계
    pub total: Decimal,
}

impl From<&OperatingExpenseReport> for OperatingExpenseSummary {
    fn from(report: &OperatingExpenseReport) -> Self {
        Self {
            ad_expense: report.ad_expense.amt,
            hr_cost: report.hr_cost.amt,
            etc_total: report.etc_total.amt,
            self_rent: report.self_rent.amt,
            common_cost: report.common_cost.amt,
            mfc_indirect: report.mfc_indirect.amt,
            total: report.total.amt,
        }
    }
}

/// Everything the cascade reads. All amounts in millions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PnlInputs {
    /// End-of-season stock TAG.
    pub end_stock: Option<Decimal>,
    /// Current-season apparel order amount.
    pub order_amount: Option<Decimal>,
    /// Current-season apparel sell-through.
    pub sales_rate: Option<Decimal>,
    /// Sales at TAG price.
    pub sales_tag: Option<Decimal>,
    /// Sales at actual price.
    pub actual_sales: Option<Decimal>,
    /// Actual sales on retail channel codes.
    pub retail_actual_sales: Option<Decimal>,
    /// VAT-excluded revenue.
    pub vat_excluded_sales: Option<Decimal>,
    /// Shipping price (V+).
    pub shipping_price: Option<Decimal>,
    /// Cost of sales.
    pub cost_of_sales: Option<CostOfSales>,
    /// Direct costs.
    pub direct_cost: Option<DirectCostSummary>,
    /// Operating expenses.
    pub operating_expense: Option<OperatingExpenseSummary>,
}

/// A line of the P&L statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnlLine {
    /// 기말재고 TAG금액
    EndStock,
    /// 발주금액(당시즌의류)
    OrderAmount,
    /// 판매TAG
    SalesTag,
    /// 실판가
    ActualSales,
    /// 할인율
    DiscountRate,
    /// 부가세차감(출고)매출
    VatExcludedSales,
    /// 출고가(V+)
    ShippingPrice,
    /// 매출원가(실적)
    Cogs,
    /// 재고평가감(환입)
    ValuationReversal,
    /// 재고평가감(추가)
    ValuationAddition,
    /// 매출원가 소계
    CogsTotal,
    /// 매출총이익
    GrossProfit,
    /// One direct cost line.
    DirectCost(DirectCostLine),
    /// 직접비 합계
    DirectCostTotal,
    /// 직접이익
    DirectProfit,
    /// 광고비
    AdExpense,
    /// 인건비
    HrCost,
    /// 기타영업비
    EtcExpense,
    /// 자가임차료
    SelfRent,
    /// 공통비 배부
    CommonCost,
    /// 제조간접비 차감
    MfcIndirect,
    /// 영업비 합계
    OperatingExpenseTotal,
    /// 영업이익
    OperatingProfit,
}

impl PnlLine {
    /// Korean statement label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EndStock => "기말재고 TAG금액",
            Self::OrderAmount => "발주금액(당시즌의류)",
            Self::SalesTag => "판매TAG",
            Self::ActualSales => "실판가",
            Self::DiscountRate => "할인율",
            Self::VatExcludedSales => "부가세차감(출고)매출",
            Self::ShippingPrice => "출고가(V+)",
            Self::Cogs => "매출원가(실적)",
            Self::ValuationReversal => "재고평가감(환입)",
            Self::ValuationAddition => "재고평가감(추가)",
            Self::CogsTotal => "매출원가 소계",
            Self::GrossProfit => "매출총이익",
            Self::DirectCost(line) => line.label(),
            Self::DirectCostTotal => "직접비 합계",
            Self::DirectProfit => "직접이익",
            Self::AdExpense => "광고비",
            Self::HrCost => "인건비",
            Self::EtcExpense => "기타영업비",
            Self::SelfRent => "자가임차료",
            Self::CommonCost => "공통비 배부",
            Self::MfcIndirect => "제조간접비 차감",
            Self::OperatingExpenseTotal => "영업비 합계",
            Self::OperatingProfit => "영업이익",
        }
    }

    /// Stable camelCase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::EndStock => "endStock",
            Self::OrderAmount => "orderAmount",
            Self::SalesTag => "salesTag",
            Self::ActualSales => "actualSales",
            Self::DiscountRate => "discountRate",
            Self::VatExcludedSales => "vatExcSales",
            Self::ShippingPrice => "shippingPrice",
            Self::Cogs => "cogs",
            Self::ValuationReversal => "inventoryValuationReversal",
            Self::ValuationAddition => "inventoryValuationAddition",
            Self::CogsTotal => "cogsTotal",
            Self::GrossProfit => "grossProfit",
            Self::DirectCost(line) => line.key(),
            Self::DirectCostTotal => "directCostTotal",
            Self::DirectProfit => "directProfit",
            Self::AdExpense => "adExpense",
            Self::HrCost => "hrCost",
            Self::EtcExpense => "etcTotal",
            Self::SelfRent => "selfRent",
            Self::CommonCost => "commonCost",
            Self::MfcIndirect => "mfcIndirect",
            Self::OperatingExpenseTotal => "operatingExpenseTotal",
            Self::OperatingProfit => "operatingProfit",
        }
    }
}

/// One statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PnlRow {
    /// Which line this is.
    #[serde(skip)]
    pub line: PnlLine,
    /// Stable key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Amount in millions.
    pub amount: Option<Decimal>,
    /// Percent column, one decimal place.
    pub percent: Option<Decimal>,
}

impl PnlRow {
    pub(crate) const fn new(
        line: PnlLine,
        amount: Option<Decimal>,
        percent: Option<Decimal>,
    ) -> Self {
        Self {
            line,
            key: line.key(),
            label: line.label(),
            amount,
            percent,
        }
    }
}

/// A derived P&L statement in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PnlStatement {
    /// Rows in display order.
    pub rows: Vec<PnlRow>,
}

impl PnlStatement {
    /// Row for a line.
    #[must_use]
    pub fn row(&self, line: PnlLine) -> Option<&PnlRow> {
        self.rows.iter().find(|row| row.line == line)
    }

    /// Amount of a line.
    #[must_use]
    pub fn amount(&self, line: PnlLine) -> Option<Decimal> {
        self.row(line).and_then(|row| row.amount)
    }

    /// Percent column of a line.
    #[must_use]
    pub fn percent(&self, line: PnlLine) -> Option<Decimal> {
        self.row(line).and_then(|row| row.percent)
    }
}
