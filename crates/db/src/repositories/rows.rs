//! Grouped warehouse rows and their mapping into core facts.

use planboard_core::catalog::{ProductAttributes, SeasonRange};
use planboard_core::channel::ChannelKey;
use planboard_core::metrics::{
    CogsFact, DirectCostAmounts, DirectCostFact, ExpenseFact, SalesFact, StockFact,
    ValuationTotals,
};
use planboard_core::season::YearMonth;
use rust_decimal::Decimal;
use sea_orm::FromQueryResult;

use super::warehouse::WarehouseError;

fn month(raw: &str) -> Result<YearMonth, WarehouseError> {
    YearMonth::parse(raw)
        .map_err(|_| WarehouseError::InvalidRow(format!("bad posting month '{raw}'")))
}

/// A season master entry with an unparseable bound counts as missing.
fn season_range(start: Option<&str>, end: Option<&str>) -> Option<SeasonRange> {
    let start = YearMonth::parse(start?).ok()?;
    let end = YearMonth::parse(end?).ok()?;
    Some(SeasonRange { start, end })
}

fn amount(value: Option<Decimal>) -> Decimal {
    value.unwrap_or_default()
}

fn product(
    category1: Option<String>,
    category2: Option<String>,
    season: Option<String>,
    start: Option<&str>,
    end: Option<&str>,
) -> ProductAttributes {
    ProductAttributes {
        category1,
        category2,
        season,
        season_range: season_range(start, end),
    }
}

// ============================================================================
// Sales
// ============================================================================

#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct SalesRow {
    pub pst_yyyymm: String,
    pub chnl_cd: Option<String>,
    pub mgmt_chnl_cd: Option<String>,
    pub mgmt_chnl_nm: Option<String>,
    pub prdt_hrrc1_nm: Option<String>,
    pub prdt_hrrc2_nm: Option<String>,
    pub sesn: Option<String>,
    pub start_yyyymm: Option<String>,
    pub end_yyyymm: Option<String>,
    pub tag_sale_amt: Option<Decimal>,
    pub act_sale_amt: Option<Decimal>,
    pub vat_exc_sale_amt: Option<Decimal>,
}

impl TryFrom<SalesRow> for SalesFact {
    type Error = WarehouseError;

    fn try_from(row: SalesRow) -> Result<Self, Self::Error> {
        Ok(Self {
            month: month(&row.pst_yyyymm)?,
            channel: ChannelKey {
                raw_code: row.chnl_cd,
                mgmt_code: row.mgmt_chnl_cd,
                mgmt_name: row.mgmt_chnl_nm,
            },
            product: product(
                row.prdt_hrrc1_nm,
                row.prdt_hrrc2_nm,
                row.sesn,
                row.start_yyyymm.as_deref(),
                row.end_yyyymm.as_deref(),
            ),
            tag_amount: amount(row.tag_sale_amt),
            actual_amount: amount(row.act_sale_amt),
            vat_excluded_amount: amount(row.vat_exc_sale_amt),
        })
    }
}

// ============================================================================
// Direct cost
// ============================================================================

#[derive(Debug, Clone, FromQueryResult)]
#[allow(clippy::struct_field_names)]
pub(crate) struct DirectCostRow {
    pub pst_yyyymm: String,
    pub chnl_cd: Option<String>,
    pub mgmt_chnl_cd: Option<String>,
    pub mgmt_chnl_nm: Option<String>,
    pub prdt_hrrc1_nm: Option<String>,
    pub prdt_hrrc2_nm: Option<String>,
    pub sesn: Option<String>,
    pub start_yyyymm: Option<String>,
    pub end_yyyymm: Option<String>,
    pub ryt: Option<Decimal>,
    pub lgt_cst: Option<Decimal>,
    pub strg_cst: Option<Decimal>,
    pub card_cms: Option<Decimal>,
    pub shop_rnt: Option<Decimal>,
    pub shop_deprc_cst: Option<Decimal>,
    pub alnc_onln_cms: Option<Decimal>,
    pub sm_cms: Option<Decimal>,
    pub df_sale_stff_cms: Option<Decimal>,
    pub dmgmt_sale_stff_cms: Option<Decimal>,
}

impl TryFrom<DirectCostRow> for DirectCostFact {
    type Error = WarehouseError;

    fn try_from(row: DirectCostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            month: month(&row.pst_yyyymm)?,
            channel: ChannelKey {
                raw_code: row.chnl_cd,
                mgmt_code: row.mgmt_chnl_cd,
                mgmt_name: row.mgmt_chnl_nm,
            },
            product: product(
                row.prdt_hrrc1_nm,
                row.prdt_hrrc2_nm,
                row.sesn,
                row.start_yyyymm.as_deref(),
                row.end_yyyymm.as_deref(),
            ),
            amounts: DirectCostAmounts {
                royalty: amount(row.ryt),
                logistics: amount(row.lgt_cst),
                storage: amount(row.strg_cst),
                card_commission: amount(row.card_cms),
                shop_rent: amount(row.shop_rnt),
                shop_depreciation: amount(row.shop_deprc_cst),
                online_commission: amount(row.alnc_onln_cms),
                store_manager_commission: amount(row.sm_cms),
                duty_free_commission: amount(row.df_sale_stff_cms),
                directly_managed_commission: amount(row.dmgmt_sale_stff_cms),
            },
        })
    }
}

// ============================================================================
// Cost of sales
// ============================================================================

#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct CogsRow {
    pub pst_yyyymm: String,
    pub chnl_cd: Option<String>,
    pub prdt_hrrc1_nm: Option<String>,
    pub prdt_hrrc2_nm: Option<String>,
    pub sesn: Option<String>,
    pub start_yyyymm: Option<String>,
    pub end_yyyymm: Option<String>,
    pub act_cogs: Option<Decimal>,
}

impl TryFrom<CogsRow> for CogsFact {
    type Error = WarehouseError;

    fn try_from(row: CogsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            month: month(&row.pst_yyyymm)?,
            raw_code: row.chnl_cd,
            product: product(
                row.prdt_hrrc1_nm,
                row.prdt_hrrc2_nm,
                row.sesn,
                row.start_yyyymm.as_deref(),
                row.end_yyyymm.as_deref(),
            ),
            amount: amount(row.act_cogs),
        })
    }
}

#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct ValuationRow {
    pub stk_asst_aprct_amt: Option<Decimal>,
    pub vltn_amt: Option<Decimal>,
}

impl From<ValuationRow> for ValuationTotals {
    fn from(row: ValuationRow) -> Self {
        Self {
            reversal: amount(row.stk_asst_aprct_amt),
            addition: amount(row.vltn_amt),
        }
    }
}

// ============================================================================
// Stock
// ============================================================================

#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct StockRow {
    pub stock_sesn: String,
    pub in_catalog: bool,
    pub prdt_hrrc1_nm: Option<String>,
    pub prdt_hrrc2_nm: Option<String>,
    pub sesn: Option<String>,
    pub start_yyyymm: Option<String>,
    pub end_yyyymm: Option<String>,
    pub end_stock_tag_amt: Option<Decimal>,
}

impl From<StockRow> for StockFact {
    fn from(row: StockRow) -> Self {
        Self {
            stock_season: row.stock_sesn,
            product: row.in_catalog.then(|| {
                product(
                    row.prdt_hrrc1_nm,
                    row.prdt_hrrc2_nm,
                    row.sesn,
                    row.start_yyyymm.as_deref(),
                    row.end_yyyymm.as_deref(),
                )
            }),
            amount: amount(row.end_stock_tag_amt),
        }
    }
}

// ============================================================================
// Cost-center expense
// ============================================================================

#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct ExpenseRow {
    pub pst_yyyymm: String,
    pub ctgr1: Option<String>,
    pub ctgr2: Option<String>,
    pub ttl_use_amt: Option<Decimal>,
    pub mfc_dept_use_amt: Option<Decimal>,
}

impl TryFrom<ExpenseRow> for ExpenseFact {
    type Error = WarehouseError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            month: month(&row.pst_yyyymm)?,
            category1: row.ctgr1,
            category2: row.ctgr2,
            total_amount: amount(row.ttl_use_amt),
            manufacturing_amount: amount(row.mfc_dept_use_amt),
        })
    }
}
