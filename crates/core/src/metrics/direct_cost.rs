//! Direct cost aggregation.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::classify;
use crate::channel::{Channel, normalize};
use crate::season::SeasonWindow;

use super::facts::DirectCostFact;
use super::ratio::to_millions;
use super::split::bucket_for;

/// Direct cost lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectCostLine {
    /// 로열티
    Royalty,
    /// 물류비
    Logistics,
    /// 보관료
    Storage,
    /// 카드수수료
    CardCommission,
    /// 매장임차료
    ShopRent,
    /// 감가상각비(매장)
    ShopDepreciation,
    /// 온라인수수료(제휴)
    OnlineCommission,
    /// 중간관리자 수수료
    StoreManagerCommission,
    /// 면세 판매직수수료
    DutyFreeCommission,
    /// 직영 판매직수수료
    DirectlyManagedCommission,
}

impl DirectCostLine {
    /// All lines in report order.
    pub const ALL: [Self; 10] = [
        Self::Royalty,
        Self::Logistics,
        Self::Storage,
        Self::CardCommission,
        Self::ShopRent,
        Self::ShopDepreciation,
        Self::OnlineCommission,
        Self::StoreManagerCommission,
        Self::DutyFreeCommission,
        Self::DirectlyManagedCommission,
    ];

    /// Korean report label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Royalty => "로열티",
            Self::Logistics => "물류비",
            Self::Storage => "보관료",
            Self::CardCommission => "카드수수료",
            Self::ShopRent => "매장임차료",
            Self::ShopDepreciation => "감가상각비(매장)",
            Self::OnlineCommission => "온라인수수료(제휴)",
            Self::StoreManagerCommission => "중간관리자 수수료",
            Self::DutyFreeCommission => "면세 판매직수수료",
            Self::DirectlyManagedCommission => "직영 판매직수수료",
        }
    }

    /// Stable camelCase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Royalty => "royalty",
            Self::Logistics => "logistics",
            Self::Storage => "storage",
            Self::CardCommission => "cardCommission",
            Self::ShopRent => "shopRent",
            Self::ShopDepreciation => "shopDepreciation",
            Self::OnlineCommission => "onlineCommission",
            Self::StoreManagerCommission => "storeManagerCommission",
            Self::DutyFreeCommission => "dutyFreeCommission",
            Self::DirectlyManagedCommission => "directlyManagedCommission",
        }
    }
}

/// The ten direct cost columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectCostAmounts {
    /// Royalty.
    #[serde(rename = "RYT")]
    pub royalty: Decimal,
    /// Logistics.
    #[serde(rename = "LGT_CST")]
    pub logistics: Decimal,
    /// Storage.
    #[serde(rename = "STRG_CST")]
    pub storage: Decimal,
    /// Card commission.
    #[serde(rename = "CARD_CMS")]
    pub card_commission: Decimal,
    /// Shop rent.
    #[serde(rename = "SHOP_RNT")]
    pub shop_rent: Decimal,
    /// Shop depreciation.
    #[serde(rename = "SHOP_DEPRC_CST")]
    pub shop_depreciation: Decimal,
    /// Partner online commission.
    #[serde(rename = "ALNC_ONLN_CMS")]
    pub online_commission: Decimal,
    /// Store manager commission.
    #[serde(rename = "SM_CMS")]
    pub store_manager_commission: Decimal,
    /// Duty-free sales staff commission.
    #[serde(rename = "DF_SALE_STFF_CMS")]
    pub duty_free_commission: Decimal,
    /// Directly managed sales staff commission.
    #[serde(rename = "DMGMT_SALE_STFF_CMS")]
    pub directly_managed_commission: Decimal,
}

impl DirectCostAmounts {
    /// Amount for one line.
    #[must_use]
    pub const fn get(&self, line: DirectCostLine) -> Decimal {
        match line {
            DirectCostLine::Royalty => self.royalty,
            DirectCostLine::Logistics => self.logistics,
            DirectCostLine::Storage => self.storage,
            DirectCostLine::CardCommission => self.card_commission,
            DirectCostLine::ShopRent => self.shop_rent,
            DirectCostLine::ShopDepreciation => self.shop_depreciation,
            DirectCostLine::OnlineCommission => self.online_commission,
            DirectCostLine::StoreManagerCommission => self.store_manager_commission,
            DirectCostLine::DutyFreeCommission => self.duty_free_commission,
            DirectCostLine::DirectlyManagedCommission => self.directly_managed_commission,
        }
    }

    /// Sum of all ten lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        DirectCostLine::ALL.iter().map(|line| self.get(*line)).sum()
    }

    /// Every line converted to millions on its own.
    #[must_use]
    pub fn to_millions(&self) -> Self {
        Self {
            royalty: to_millions(self.royalty),
            logistics: to_millions(self.logistics),
            storage: to_millions(self.storage),
            card_commission: to_millions(self.card_commission),
            shop_rent: to_millions(self.shop_rent),
            shop_depreciation: to_millions(self.shop_depreciation),
            online_commission: to_millions(self.online_commission),
            store_manager_commission: to_millions(self.store_manager_commission),
            duty_free_commission: to_millions(self.duty_free_commission),
            directly_managed_commission: to_millions(self.directly_managed_commission),
        }
    }
}

impl AddAssign<&DirectCostAmounts> for DirectCostAmounts {
    fn add_assign(&mut self, rhs: &Self) {
        self.royalty += rhs.royalty;
        self.logistics += rhs.logistics;
        self.storage += rhs.storage;
        self.card_commission += rhs.card_commission;
        self.shop_rent += rhs.shop_rent;
        self.shop_depreciation += rhs.shop_depreciation;
        self.online_commission += rhs.online_commission;
        self.store_manager_commission += rhs.store_manager_commission;
        self.duty_free_commission += rhs.duty_free_commission;
        self.directly_managed_commission += rhs.directly_managed_commission;
    }
}

/// Direct costs for one raw channel code, in millions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectCostRow {
    /// Raw channel code.
    #[serde(rename = "CHNL_CD")]
    pub code: String,
    /// Cost lines.
    #[serde(flatten)]
    pub amounts: DirectCostAmounts,
    /// Sum of the lines, rounded from the unrounded sum.
    #[serde(rename = "DIRECT_COST_TOTAL")]
    pub total: Decimal,
}

/// Direct costs for one normalized channel, in millions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectCostChannelRow {
    /// Channel.
    #[serde(rename = "CHNL_NM")]
    pub channel: Channel,
    /// Cost lines.
    #[serde(flatten)]
    pub amounts: DirectCostAmounts,
    /// Sum of the lines.
    #[serde(rename = "DIRECT_COST_TOTAL")]
    pub total: Decimal,
}

/// Direct cost report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectCostReport {
    /// Rows per raw channel code.
    pub by_code: Vec<DirectCostRow>,
    /// Rows per normalized channel.
    pub by_channel: Vec<DirectCostChannelRow>,
    /// Overall totals per line.
    pub totals: DirectCostAmounts,
    /// Overall total.
    pub total: Decimal,
}

fn code_rank(code: &str) -> u8 {
    match code {
        "1" => 1,
        "2" => 2,
        "3" => 3,
        "4" => 4,
        "5" => 5,
        "6" => 6,
        "7" => 7,
        "8" => 8,
        "11" => 9,
        _ => 99,
    }
}

/// Aggregates direct costs through the seasonal split.
#[must_use]
pub fn aggregate_direct_cost(facts: &[DirectCostFact], window: &SeasonWindow) -> DirectCostReport {
    let mut by_code: BTreeMap<String, DirectCostAmounts> = BTreeMap::new();
    let mut by_channel: BTreeMap<Channel, DirectCostAmounts> = BTreeMap::new();
    let mut overall = DirectCostAmounts::default();

    for fact in facts {
        let Some(channel) = normalize(&fact.channel) else {
            continue;
        };
        if !bucket_for(classify(&fact.product, window), fact.month, window).is_counted() {
            continue;
        }
        if let Some(code) = &fact.channel.raw_code {
            *by_code.entry(code.clone()).or_default() += &fact.amounts;
        }
        *by_channel.entry(channel).or_default() += &fact.amounts;
        overall += &fact.amounts;
    }

    let mut code_rows: Vec<DirectCostRow> = by_code
        .into_iter()
        .map(|(code, amounts)| DirectCostRow {
            code,
            amounts: amounts.to_millions(),
            total: to_millions(amounts.total()),
        })
        .collect();
    code_rows.sort_by(|a, b| (code_rank(&a.code), &a.code).cmp(&(code_rank(&b.code), &b.code)));

    let mut channel_rows: Vec<DirectCostChannelRow> = by_channel
        .into_iter()
        .map(|(channel, amounts)| DirectCostChannelRow {
            channel,
            amounts: amounts.to_millions(),
            total: to_millions(amounts.total()),
        })
        .collect();
    channel_rows.sort_by(|a, b| a.channel.sort_key().cmp(&b.channel.sort_key()));

    DirectCostReport {
        by_code: code_rows,
        by_channel: channel_rows,
        totals: overall.to_millions(),
        total: to_millions(overall.total()),
    }
}
