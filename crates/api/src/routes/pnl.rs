//! P&L report routes.
//!
//! Every report takes `brandCode` (default `M`) and `season` (default `23S`,
//! `25S` for end stock) and answers `{ "success": true, ... }`.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use planboard_core::metrics::{OperatingExpenseReport, SalesMeasure};
use planboard_core::season::{SeasonCode, SeasonWindow, YearMonth};
use planboard_db::WarehouseRepository;
use planboard_shared::BrandCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiResult;
use crate::reports;

/// Season used when a report request names none.
pub const DEFAULT_SEASON: &str = "23S";

/// Default season of the end-stock report.
pub const DEFAULT_END_STOCK_SEASON: &str = "25S";

/// Creates the P&L report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/pnl/sales-tag", get(get_sales_tag))
        .route("/api/pnl/actual-sales", get(get_actual_sales))
        .route("/api/pnl/vat-excluded-sales", get(get_vat_excluded_sales))
        .route("/api/pnl/order-amount", get(get_order_amount))
        .route("/api/pnl/end-stock", get(get_end_stock))
        .route("/api/pnl/cost-of-sales", get(get_cost_of_sales))
        .route("/api/pnl/direct-cost", get(get_direct_cost))
        .route("/api/pnl/operating-expense", get(get_operating_expense))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters shared by the report routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Brand code.
    pub brand_code: Option<String>,
    /// Season code.
    pub season: Option<String>,
}

/// Blank parameters count as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Brand from a query parameter, `M` when absent.
pub(crate) fn brand_param(value: Option<&str>) -> ApiResult<BrandCode> {
    Ok(non_blank(value)
        .map(BrandCode::parse)
        .transpose()?
        .unwrap_or_default())
}

impl ReportQuery {
    fn resolve(&self, default_season: &str) -> ApiResult<(BrandCode, SeasonWindow)> {
        let brand = brand_param(self.brand_code.as_deref())?;
        let season = non_blank(self.season.as_deref()).unwrap_or(default_season);
        Ok((brand, SeasonWindow::parse(season)?))
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Request echo attached to channel reports.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowParams {
    /// Brand code.
    pub brand_code: String,
    /// Season code.
    pub season: SeasonCode,
    /// First month of the season.
    pub period_start: YearMonth,
    /// Last month of the season.
    pub period_end: YearMonth,
    /// First month current-season apparel counts from.
    pub current_season_start: YearMonth,
}

impl WindowParams {
    fn new(brand: &BrandCode, window: &SeasonWindow) -> Self {
        Self {
            brand_code: brand.to_string(),
            season: window.season,
            period_start: window.period_start,
            period_end: window.period_end,
            current_season_start: window.current_season_start,
        }
    }
}

/// Period bounds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// First month.
    pub start: YearMonth,
    /// Last month.
    pub end: YearMonth,
    /// First month current-season apparel counts from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_season_start: Option<YearMonth>,
}

/// Operating expense response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenseResponse {
    /// Always true.
    pub success: bool,
    /// Brand code.
    pub brand_code: String,
    /// Season code.
    pub season: SeasonCode,
    /// Current-year period.
    pub period: Period,
    /// Prior-year period.
    pub py_period: Period,
    /// The report.
    #[serde(flatten)]
    pub report: OperatingExpenseReport,
}

// ============================================================================
// Route Handlers
// ============================================================================

fn repository(state: &AppState) -> WarehouseRepository {
    WarehouseRepository::new((*state.db).clone())
}

async fn sales_response(
    state: &AppState,
    query: &ReportQuery,
    measure: SalesMeasure,
) -> ApiResult<Json<Value>> {
    let (brand, window) = query.resolve(DEFAULT_SEASON)?;
    let report = reports::sales_report(&repository(state), &brand, &window, measure).await?;

    let mut body = json!({
        "success": true,
        "data": report.channels,
        "channels": report.channels,
        "chnlCdData": report.by_code,
        "total": report.total,
        "totalPY": report.total_py,
        "totalYOY": report.total_yoy,
        "params": WindowParams::new(&brand, &window),
    });
    if measure == SalesMeasure::Actual {
        body["retailActSaleAmt"] = json!(report.retail_total);
    }
    Ok(Json(body))
}

/// GET /api/pnl/sales-tag
#[axum::debug_handler]
async fn get_sales_tag(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    sales_response(&state, &query, SalesMeasure::Tag).await
}

/// GET /api/pnl/actual-sales
#[axum::debug_handler]
async fn get_actual_sales(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    sales_response(&state, &query, SalesMeasure::Actual).await
}

/// GET /api/pnl/vat-excluded-sales
#[axum::debug_handler]
async fn get_vat_excluded_sales(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    let (brand, window) = query.resolve(DEFAULT_SEASON)?;
    let report = reports::vat_excluded_report(&repository(&state), &brand, &window).await?;

    Ok(Json(json!({
        "success": true,
        "data": report.channels,
        "total": report.total_vat_excluded,
        "totalActSale": report.total_actual,
        "shippingTotal": report.shipping_total,
        "params": WindowParams::new(&brand, &window),
    })))
}

/// GET /api/pnl/order-amount
#[axum::debug_handler]
async fn get_order_amount(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    let (brand, window) = query.resolve(DEFAULT_SEASON)?;
    let order = reports::order_amount_report(&repository(&state), &brand, &window).await?;

    Ok(Json(json!({
        "success": true,
        "data": order,
        "params": WindowParams::new(&brand, &window),
    })))
}

/// GET /api/pnl/end-stock
#[axum::debug_handler]
async fn get_end_stock(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    let (brand, window) = query.resolve(DEFAULT_END_STOCK_SEASON)?;
    let report = reports::end_stock_report(&repository(&state), &brand, &window).await?;

    Ok(Json(json!({
        "success": true,
        "data": report.rows,
        "season": window.season,
        "targetYYYYMM": report.target_month,
        "pyYYYYMM": report.prior_month,
    })))
}

/// GET /api/pnl/cost-of-sales
#[axum::debug_handler]
async fn get_cost_of_sales(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    let (brand, window) = query.resolve(DEFAULT_SEASON)?;
    let cost = reports::cost_of_sales_report(&repository(&state), &brand, &window).await?;

    Ok(Json(json!({
        "success": true,
        "data": cost,
        "params": WindowParams::new(&brand, &window),
    })))
}

/// GET /api/pnl/direct-cost
#[axum::debug_handler]
async fn get_direct_cost(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Value>> {
    let (brand, window) = query.resolve(DEFAULT_SEASON)?;
    let report = reports::direct_cost_report(&repository(&state), &brand, &window).await?;

    Ok(Json(json!({
        "success": true,
        "brandCode": brand,
        "season": window.season,
        "period": Period {
            start: window.period_start,
            end: window.period_end,
            current_season_start: Some(window.current_season_start),
        },
        "data": report.by_code,
        "channels": report.by_channel,
        "totals": report.totals,
        "total": report.total,
    })))
}

/// GET /api/pnl/operating-expense
#[axum::debug_handler]
async fn get_operating_expense(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<OperatingExpenseResponse>> {
    let (brand, window) = query.resolve(DEFAULT_SEASON)?;
    let report = reports::operating_expense_report(&repository(&state), &brand, &window).await?;
    let prior = window.prior_year();

    Ok(Json(OperatingExpenseResponse {
        success: true,
        brand_code: brand.to_string(),
        season: window.season,
        period: Period {
            start: window.period_start,
            end: window.period_end,
            current_season_start: None,
        },
        py_period: Period {
            start: prior.period_start,
            end: prior.period_end,
            current_season_start: None,
        },
        report,
    }))
}
