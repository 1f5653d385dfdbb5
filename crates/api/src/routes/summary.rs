//! Multi-season P&L summary.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use futures::future::join_all;
use planboard_core::compare::{SeriesComparison, compare_series};
use planboard_core::pnl::{PnlLine, PnlRow};
use planboard_core::season::{SeasonCode, SeasonWindow};
use planboard_db::WarehouseRepository;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::pnl::{Period, brand_param, non_blank};
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::reports::{SeasonSummary, season_summary};

/// Seasons summarized when the request names none.
pub const DEFAULT_SEASONS: &str = "23S,24S,25S";

/// Most seasons one summary request may cover.
pub const MAX_SEASONS: usize = 6;

/// Lines that carry season-over-season comparisons.
pub const HEADLINE_LINES: [PnlLine; 7] = [
    PnlLine::EndStock,
    PnlLine::SalesTag,
    PnlLine::ActualSales,
    PnlLine::VatExcludedSales,
    PnlLine::GrossProfit,
    PnlLine::DirectProfit,
    PnlLine::OperatingProfit,
];

/// Creates the summary route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/pnl/summary", get(get_summary))
}

/// Query parameters for the summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Brand code.
    pub brand_code: Option<String>,
    /// Comma-separated season codes.
    pub seasons: Option<String>,
}

/// One season of the summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStatement {
    /// Season code.
    pub season: SeasonCode,
    /// Season months.
    pub period: Period,
    /// Current-season apparel sell-through.
    pub sales_rate: Option<Decimal>,
    /// Statement rows in display order.
    pub rows: Vec<PnlRow>,
}

/// Comparisons of one headline line across the requested seasons.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineComparison {
    /// Line key.
    pub key: &'static str,
    /// Line label.
    pub label: &'static str,
    /// One entry per season, oldest first.
    pub values: Vec<SeriesComparison>,
}

/// Summary response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Always true.
    pub success: bool,
    /// Brand code.
    pub brand_code: String,
    /// Seasons, oldest first.
    pub seasons: Vec<SeasonCode>,
    /// One statement per season.
    pub data: Vec<SeasonStatement>,
    /// Headline comparisons.
    pub comparisons: Vec<LineComparison>,
}

/// Parses the season list, oldest first without duplicates.
fn parse_seasons(raw: &str) -> ApiResult<Vec<SeasonWindow>> {
    let mut seasons = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SeasonCode::parse)
        .collect::<Result<Vec<_>, _>>()?;
    seasons.sort_unstable();
    seasons.dedup();

    if seasons.is_empty() {
        return Err(ApiError::bad_request("at least one season is required"));
    }
    if seasons.len() > MAX_SEASONS {
        return Err(ApiError::bad_request(format!(
            "at most {MAX_SEASONS} seasons can be summarized"
        )));
    }
    Ok(seasons
        .into_iter()
        .map(SeasonWindow::resolve)
        .collect::<Result<Vec<_>, _>>()?)
}

fn compare_headlines(summaries: &[SeasonSummary]) -> Vec<LineComparison> {
    HEADLINE_LINES
        .iter()
        .map(|&line| {
            let series: Vec<_> = summaries
                .iter()
                .map(|s| s.statement.amount(line))
                .collect();
            LineComparison {
                key: line.key(),
                label: line.label(),
                values: compare_series(&series),
            }
        })
        .collect()
}

/// GET /api/pnl/summary
#[axum::debug_handler]
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let brand = brand_param(query.brand_code.as_deref())?;
    let windows = parse_seasons(non_blank(query.seasons.as_deref()).unwrap_or(DEFAULT_SEASONS))?;

    let repo = WarehouseRepository::new((*state.db).clone());
    let summaries = join_all(
        windows
            .into_iter()
            .map(|window| season_summary(&repo, &brand, window)),
    )
    .await;
    info!(brand = %brand, seasons = summaries.len(), "Built P&L summary");

    let comparisons = compare_headlines(&summaries);
    let data = summaries
        .into_iter()
        .map(|s| SeasonStatement {
            season: s.window.season,
            period: Period {
                start: s.window.period_start,
                end: s.window.period_end,
                current_season_start: Some(s.window.current_season_start),
            },
            sales_rate: s.inputs.sales_rate,
            rows: s.statement.rows,
        })
        .collect::<Vec<_>>();

    Ok(Json(SummaryResponse {
        success: true,
        brand_code: brand.to_string(),
        seasons: data.iter().map(|s| s.season).collect(),
        data,
        comparisons,
    }))
}
