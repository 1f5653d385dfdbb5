//! Warehouse diagnostics.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use planboard_core::season::YearMonth;
use planboard_db::{ColumnInfo, CostCenterCategory, WarehouseRepository};
use serde::{Deserialize, Serialize};

use super::pnl::{brand_param, non_blank};
use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Table inspected when none is named.
pub const DEFAULT_TABLE: &str = "DM_PL_SHOP_PRDT_M";

const DEFAULT_PERIOD_START: &str = "202303";
const DEFAULT_PERIOD_END: &str = "202308";

/// Creates the diagnostics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/pnl/check-columns", get(check_columns))
        .route("/api/pnl/check-data", get(check_data))
}

/// Query parameters for the column listing.
#[derive(Debug, Deserialize)]
pub struct ColumnsQuery {
    /// Mart table name.
    pub table: Option<String>,
}

/// Query parameters for the cost-center sample.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    /// Brand code.
    pub brand_code: Option<String>,
    /// First month, `YYYYMM`.
    pub period_start: Option<String>,
    /// Last month, `YYYYMM`.
    pub period_end: Option<String>,
}

/// Column listing response.
#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    /// Always true.
    pub success: bool,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnInfo>,
}

/// Month range echo.
#[derive(Debug, Serialize)]
pub struct MonthRange {
    /// First month.
    pub start: YearMonth,
    /// Last month.
    pub end: YearMonth,
}

/// Cost-center sample response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    /// Always true.
    pub success: bool,
    /// Brand code.
    pub brand_code: String,
    /// Months sampled.
    pub period: MonthRange,
    /// Distinct categories.
    pub data: Vec<CostCenterCategory>,
}

fn is_table_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// GET /api/pnl/check-columns
#[axum::debug_handler]
async fn check_columns(
    State(state): State<AppState>,
    Query(query): Query<ColumnsQuery>,
) -> ApiResult<Json<ColumnsResponse>> {
    let table = non_blank(query.table.as_deref()).unwrap_or(DEFAULT_TABLE);
    if !is_table_name(table) {
        return Err(ApiError::bad_request(format!("invalid table name '{table}'")));
    }

    let repo = WarehouseRepository::new((*state.db).clone());
    let columns = repo.table_columns(table).await?;
    Ok(Json(ColumnsResponse {
        success: true,
        columns,
    }))
}

/// GET /api/pnl/check-data
#[axum::debug_handler]
async fn check_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> ApiResult<Json<DataResponse>> {
    let brand = brand_param(query.brand_code.as_deref())?;
    let start = YearMonth::parse(
        non_blank(query.period_start.as_deref()).unwrap_or(DEFAULT_PERIOD_START),
    )?;
    let end = YearMonth::parse(non_blank(query.period_end.as_deref()).unwrap_or(DEFAULT_PERIOD_END))?;
    if start > end {
        return Err(ApiError::bad_request(format!(
            "periodStart {start} is after periodEnd {end}"
        )));
    }

    let repo = WarehouseRepository::new((*state.db).clone());
    let data = repo.cost_center_categories(&brand, start, end).await?;
    Ok(Json(DataResponse {
        success: true,
        brand_code: brand.to_string(),
        period: MonthRange { start, end },
        data,
    }))
}
