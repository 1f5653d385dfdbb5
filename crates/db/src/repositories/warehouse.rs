//! Warehouse repository.
//!
//! Every statement binds brand, months and dates as values; no request text
//! is spliced into SQL. Rows come back grouped by month, channel identifiers
//! and product attributes so nothing the core crate needs is lost.

use planboard_core::brand::ValuationExclusion;
use planboard_core::metrics::{
    CogsFact, DirectCostFact, ExpenseFact, SalesFact, StockFact, ValuationTotals,
};
use planboard_core::season::YearMonth;
use planboard_shared::BrandCode;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};
use serde::Serialize;
use tracing::debug;

use super::rows::{CogsRow, DirectCostRow, ExpenseRow, SalesRow, StockRow, ValuationRow};

/// Schema holding the reporting marts.
pub const MART_SCHEMA: &str = "sap_fnf";

/// Maximum rows returned by the cost-center category sample.
pub const CATEGORY_SAMPLE_LIMIT: i64 = 100;

/// Error types for warehouse operations.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A row that cannot be mapped into a fact.
    #[error("Invalid warehouse row: {0}")]
    InvalidRow(String),
}

/// A column of a mart table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ColumnInfo {
    /// Column name.
    pub column_name: String,
    /// Declared data type.
    pub data_type: String,
}

/// A distinct cost-center category combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CostCenterCategory {
    /// Category level 1.
    pub ctgr1: Option<String>,
    /// Category level 2.
    pub ctgr2: Option<String>,
    /// Category level 3.
    pub ctgr3: Option<String>,
    /// GL account code.
    pub gl_cd: Option<String>,
    /// GL account name.
    pub gl_nm: Option<String>,
}

// ============================================================================
// Statements
// ============================================================================

pub(super) const SALES_SQL: &str = r"
SELECT a.pst_yyyymm::text AS pst_yyyymm,
       a.chnl_cd,
       s.mgmt_chnl_cd,
       s.mgmt_chnl_nm,
       p.prdt_hrrc1_nm,
       p.prdt_hrrc2_nm,
       p.sesn,
       m.start_yyyymm::text AS start_yyyymm,
       m.end_yyyymm::text AS end_yyyymm,
       SUM(COALESCE(a.tag_sale_amt, 0)) AS tag_sale_amt,
       SUM(COALESCE(a.act_sale_amt, 0)) AS act_sale_amt,
       SUM(COALESCE(a.vat_exc_act_sale_amt, 0) - COALESCE(a.dstrb_cms, 0)) AS vat_exc_sale_amt
FROM sap_fnf.dm_pl_shop_prdt_m a
JOIN sap_fnf.mst_shop s ON a.brd_cd = s.brd_cd AND a.shop_cd = s.sap_shop_cd
JOIN sap_fnf.mst_prdt p ON a.prdt_cd = p.prdt_cd AND p.brd_cd = a.brd_cd
LEFT JOIN comm.mst_sesn m ON p.sesn = m.sesn
WHERE a.brd_cd = $1
  AND a.corp_cd = '1000'
  AND a.pst_yyyymm BETWEEN $2 AND $3
GROUP BY 1, 2, 3, 4, 5, 6, 7, 8, 9
";

const DIRECT_COST_SQL: &str = r"
SELECT a.pst_yyyymm::text AS pst_yyyymm,
       a.chnl_cd,
       s.mgmt_chnl_cd,
       s.mgmt_chnl_nm,
       p.prdt_hrrc1_nm,
       p.prdt_hrrc2_nm,
       p.sesn,
       m.start_yyyymm::text AS start_yyyymm,
       m.end_yyyymm::text AS end_yyyymm,
       SUM(COALESCE(a.ryt, 0)) AS ryt,
       SUM(COALESCE(a.lgt_cst, 0)) AS lgt_cst,
       SUM(COALESCE(a.strg_cst, 0)) AS strg_cst,
       SUM(COALESCE(a.card_cms, 0)) AS card_cms,
       SUM(COALESCE(a.shop_rnt, 0)) AS shop_rnt,
       SUM(COALESCE(a.shop_deprc_cst, 0)) AS shop_deprc_cst,
       SUM(COALESCE(a.alnc_onln_cms, 0)) AS alnc_onln_cms,
       SUM(COALESCE(a.sm_cms, 0)) AS sm_cms,
       SUM(COALESCE(a.df_sale_stff_cms, 0)) AS df_sale_stff_cms,
       SUM(COALESCE(a.dmgmt_sale_stff_cms, 0)) AS dmgmt_sale_stff_cms
FROM sap_fnf.dm_dcst_shop_prdt_m a
LEFT JOIN sap_fnf.mst_shop s ON a.brd_cd = s.brd_cd AND a.shop_cd = s.sap_shop_cd
JOIN sap_fnf.mst_prdt p ON a.prdt_cd = p.prdt_cd AND p.brd_cd = a.brd_cd
LEFT JOIN comm.mst_sesn m ON p.sesn = m.sesn
WHERE a.brd_cd = $1
  AND a.corp_cd = '1000'
  AND a.pst_yyyymm BETWEEN $2 AND $3
GROUP BY 1, 2, 3, 4, 5, 6, 7, 8, 9
";

const COGS_SQL: &str = r"
SELECT TO_CHAR(a.pst_dt, 'YYYYMM') AS pst_yyyymm,
       a.chnl_cd,
       p.prdt_hrrc1_nm,
       p.prdt_hrrc2_nm,
       p.sesn,
       m.start_yyyymm::text AS start_yyyymm,
       m.end_yyyymm::text AS end_yyyymm,
       SUM(COALESCE(a.act_cogs, 0)) AS act_cogs
FROM sap_fnf.dw_copa_d a
JOIN sap_fnf.mst_prdt p ON a.prdt_cd = p.prdt_cd AND p.brd_cd = a.brd_cd
LEFT JOIN comm.mst_sesn m ON p.sesn = m.sesn
WHERE a.brd_cd = $1
  AND a.corp_cd = '1000'
  AND a.pst_dt BETWEEN $2 AND $3
GROUP BY 1, 2, 3, 4, 5, 6, 7
";

pub(super) const VALUATION_SQL: &str = r"
SELECT SUM(COALESCE(a.stk_asst_aprct_amt, 0)) AS stk_asst_aprct_amt,
       SUM(COALESCE(a.vltn_amt, 0)) AS vltn_amt
FROM sap_fnf.dw_copa_d a
JOIN sap_fnf.mst_prdt p ON a.prdt_cd = p.prdt_cd
WHERE a.brd_cd = $1
  AND a.chnl_cd <> '9'
  AND a.chnl_cd IS NOT NULL
  AND a.pst_dt BETWEEN $2 AND $3
";

pub(super) const VALUATION_EXCLUSION_SQL: &str = r"
  AND NOT (p.sesn = $4 AND p.middle_class_cd = $5)
";

pub(super) const STOCK_SQL: &str = r"
SELECT a.sesn AS stock_sesn,
       (p.prdt_cd IS NOT NULL) AS in_catalog,
       p.prdt_hrrc1_nm,
       p.prdt_hrrc2_nm,
       p.sesn,
       m.start_yyyymm::text AS start_yyyymm,
       m.end_yyyymm::text AS end_yyyymm,
       SUM(COALESCE(a.end_stock_tag_amt, 0)) AS end_stock_tag_amt
FROM sap_fnf.dw_ivtr_shop_prdt_m a
LEFT JOIN sap_fnf.mst_prdt p ON a.prdt_cd = p.prdt_cd AND p.brd_cd = a.brd_cd
LEFT JOIN comm.mst_sesn m ON p.sesn = m.sesn
WHERE a.brd_cd = $1
  AND a.yyyymm = $2
  AND a.sesn IS NOT NULL
GROUP BY 1, 2, 3, 4, 5, 6, 7
";

const EXPENSE_SQL: &str = r"
SELECT pst_yyyymm::text AS pst_yyyymm,
       ctgr1,
       ctgr2,
       SUM(COALESCE(ttl_use_amt, 0)) AS ttl_use_amt,
       SUM(COALESCE(mfc_dept_use_amt, 0)) AS mfc_dept_use_amt
FROM sap_fnf.dm_idcst_cctr_m
WHERE brd_cd = $1
  AND pst_yyyymm BETWEEN $2 AND $3
GROUP BY 1, 2, 3
";

const COLUMNS_SQL: &str = r"
SELECT column_name::text AS column_name,
       data_type::text AS data_type
FROM information_schema.columns
WHERE table_schema = $1
  AND table_name = $2
ORDER BY ordinal_position
";

const CATEGORIES_SQL: &str = r"
SELECT DISTINCT ctgr1, ctgr2, ctgr3, gl_cd, gl_nm
FROM sap_fnf.dm_idcst_cctr_m
WHERE brd_cd = $1
  AND pst_yyyymm BETWEEN $2 AND $3
ORDER BY ctgr1, ctgr2, ctgr3
LIMIT $4
";

fn statement(sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

fn month_range(brand: &BrandCode, from: YearMonth, to: YearMonth) -> Vec<Value> {
    vec![
        brand.as_str().into(),
        from.to_string().into(),
        to.to_string().into(),
    ]
}

// ============================================================================
// Repository
// ============================================================================

/// Warehouse repository for fact queries.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    db: DatabaseConnection,
}

impl WarehouseRepository {
    /// Creates a new warehouse repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Monthly sales facts for `from..=to`, every channel included.
    pub async fn sales_facts(
        &self,
        brand: &BrandCode,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<SalesFact>, WarehouseError> {
        let rows = SalesRow::find_by_statement(statement(SALES_SQL, month_range(brand, from, to)))
            .all(&self.db)
            .await?;
        debug!(brand = %brand, %from, %to, rows = rows.len(), "Fetched sales facts");
        rows.into_iter().map(SalesFact::try_from).collect()
    }

    /// Monthly direct-cost facts for `from..=to`.
    pub async fn direct_cost_facts(
        &self,
        brand: &BrandCode,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<DirectCostFact>, WarehouseError> {
        let rows = DirectCostRow::find_by_statement(statement(
            DIRECT_COST_SQL,
            month_range(brand, from, to),
        ))
        .all(&self.db)
        .await?;
        debug!(brand = %brand, %from, %to, rows = rows.len(), "Fetched direct cost facts");
        rows.into_iter().map(DirectCostFact::try_from).collect()
    }

    /// Monthly COGS facts posted between the first day of `from` and the last
    /// day of `to`.
    pub async fn cogs_facts(
        &self,
        brand: &BrandCode,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<CogsFact>, WarehouseError> {
        let values = vec![
            brand.as_str().into(),
            from.first_day().into(),
            to.last_day().into(),
        ];
        let rows = CogsRow::find_by_statement(statement(COGS_SQL, values))
            .all(&self.db)
            .await?;
        debug!(brand = %brand, %from, %to, rows = rows.len(), "Fetched COGS facts");
        rows.into_iter().map(CogsFact::try_from).collect()
    }

    /// Inventory revaluation sums over `from..=to`, less the brand's
    /// excluded season and middle class when one is given.
    pub async fn valuation_totals(
        &self,
        brand: &BrandCode,
        from: YearMonth,
        to: YearMonth,
        exclusion: Option<ValuationExclusion>,
    ) -> Result<ValuationTotals, WarehouseError> {
        let mut values: Vec<Value> = vec![
            brand.as_str().into(),
            from.first_day().into(),
            to.last_day().into(),
        ];
        let sql = match exclusion {
            Some(excluded) => {
                values.push(excluded.season.into());
                values.push(excluded.middle_class_code.into());
                format!("{VALUATION_SQL}{VALUATION_EXCLUSION_SQL}")
            }
            None => VALUATION_SQL.to_string(),
        };

        let row = ValuationRow::find_by_statement(statement(&sql, values))
            .one(&self.db)
            .await?;
        Ok(row.map(ValuationTotals::from).unwrap_or_default())
    }

    /// End-of-month stock for one month. Rows without a stock season are
    /// skipped; rows whose product is not in the catalog come back without
    /// product attributes.
    pub async fn stock_facts(
        &self,
        brand: &BrandCode,
        month: YearMonth,
    ) -> Result<Vec<StockFact>, WarehouseError> {
        let values = vec![brand.as_str().into(), month.to_string().into()];
        let rows = StockRow::find_by_statement(statement(STOCK_SQL, values))
            .all(&self.db)
            .await?;
        debug!(brand = %brand, %month, rows = rows.len(), "Fetched stock facts");
        Ok(rows.into_iter().map(StockFact::from).collect())
    }

    /// Monthly cost-center expense for `from..=to`.
    pub async fn expense_facts(
        &self,
        brand: &BrandCode,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<ExpenseFact>, WarehouseError> {
        let rows =
            ExpenseRow::find_by_statement(statement(EXPENSE_SQL, month_range(brand, from, to)))
                .all(&self.db)
                .await?;
        debug!(brand = %brand, %from, %to, rows = rows.len(), "Fetched expense facts");
        rows.into_iter().map(ExpenseFact::try_from).collect()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Columns of a mart table in ordinal order. Table names match
    /// case-insensitively.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, WarehouseError> {
        let values = vec![MART_SCHEMA.into(), table.to_lowercase().into()];
        Ok(ColumnInfo::find_by_statement(statement(COLUMNS_SQL, values))
            .all(&self.db)
            .await?)
    }

    /// Distinct cost-center categories posted in `from..=to`, capped at
    /// [`CATEGORY_SAMPLE_LIMIT`] rows.
    pub async fn cost_center_categories(
        &self,
        brand: &BrandCode,
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<CostCenterCategory>, WarehouseError> {
        let mut values = month_range(brand, from, to);
        values.push(CATEGORY_SAMPLE_LIMIT.into());
        Ok(
            CostCenterCategory::find_by_statement(statement(CATEGORIES_SQL, values))
                .all(&self.db)
                .await?,
        )
    }
}
