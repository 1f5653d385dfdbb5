//! Insight request types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pnl::OperatingExpenseSummary;

/// One channel amount in millions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelAmount {
    /// Channel name.
    #[serde(rename = "CHNL_NM")]
    pub channel: String,
    /// Sales TAG or actual sales, depending on the list.
    #[serde(alias = "SALE_TAG_AMT", alias = "ACT_SALE_AMT", default)]
    pub amount: Option<Decimal>,
}

/// Direct cost lines of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectCostSnapshot {
    /// 로열티
    pub royalty: Option<Decimal>,
    /// 물류비
    pub logistics: Option<Decimal>,
    /// 보관료
    pub storage: Option<Decimal>,
    /// 카드수수료
    pub card_commission: Option<Decimal>,
    /// 매장임차료
    pub shop_rent: Option<Decimal>,
    /// 감가상각비(매장)
    pub shop_depreciation: Option<Decimal>,
    /// 온라인수수료(제휴)
    pub online_commission: Option<Decimal>,
    /// 중간관리자 수수료
    pub store_manager_commission: Option<Decimal>,
    /// 면세 판매직수수료
    pub duty_free_commission: Option<Decimal>,
    /// 직영 판매직수수료
    pub directly_managed_commission: Option<Decimal>,
    /// 직접비 합계
    pub total: Option<Decimal>,
}

/// A season's P&L as shown on the dashboard, in millions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonSnapshot {
    /// 기말재고 TAG금액
    pub end_stock: Option<Decimal>,
    /// 발주금액(당시즌의류)
    pub order_amount: Option<Decimal>,
    /// 판매율
    pub sales_rate: Option<Decimal>,
    /// 판매TAG
    pub sales_tag: Option<Decimal>,
    /// 실판가
    pub actual_sales: Option<Decimal>,
    /// 할인율
    pub discount_rate: Option<Decimal>,
    /// 부가세차감(출고)매출
    pub vat_exc_sales: Option<Decimal>,
    /// 출고가(V+)
    pub shipping_price: Option<Decimal>,
    /// 매출원가(실적)
    pub cogs: Option<Decimal>,
    /// 재고평가감(환입)
    pub inventory_valuation_reversal: Option<Decimal>,
    /// 재고평가감(추가)
    pub inventory_valuation_addition: Option<Decimal>,
    /// 매출원가 소계
    pub cogs_total: Option<Decimal>,
    /// 매출총이익
    pub gross_profit: Option<Decimal>,
    /// 직접비
    pub direct_cost: Option<DirectCostSnapshot>,
    /// 직접이익
    pub direct_profit: Option<Decimal>,
    /// 영업비
    pub operating_expense: Option<OperatingExpenseSummary>,
    /// 영업이익
    pub operating_profit: Option<Decimal>,
    /// 채널별 판매TAG
    pub sales_tag_channels: Option<Vec<ChannelAmount>>,
    /// 채널별 실판가
    pub actual_sales_channels: Option<Vec<ChannelAmount>>,
}

/// Body of an insight request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalInsightInput {
    /// Brand name.
    pub brand: String,
    /// Korean brand name.
    #[serde(default)]
    pub brand_ko: Option<String>,
    /// Snapshots keyed by season code.
    pub pnl_data: BTreeMap<String, SeasonSnapshot>,
}
