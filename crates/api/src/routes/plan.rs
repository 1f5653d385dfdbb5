//! Next-season planning routes.

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::post,
};
use planboard_core::planning::{
    SalesInputRow, SalesPlanSummary, SimulationInput, SimulationResult, simulate,
    summarize_sales_plan,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the planning routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/plan/simulate", post(run_simulation))
        .route("/api/plan/sales-summary", post(sales_summary))
}

/// Sales input sheets to compare.
#[derive(Debug, Deserialize)]
pub struct SalesSummaryRequest {
    /// Base-season rows.
    #[serde(default)]
    pub base: Vec<SalesInputRow>,
    /// Planned rows.
    #[serde(default)]
    pub plan: Vec<SalesInputRow>,
}

/// Successful planning response.
#[derive(Debug, Serialize)]
pub struct PlanResponse<T> {
    /// Always true.
    pub success: bool,
    /// Calculation result.
    pub data: T,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// POST /api/plan/simulate
#[axum::debug_handler]
async fn run_simulation(
    payload: Result<Json<SimulationInput>, JsonRejection>,
) -> ApiResult<Json<PlanResponse<SimulationResult>>> {
    let input = body(payload)?;
    let result = simulate(&input)?;
    debug!(
        channels = input.channels.len(),
        total_revenue = %result.total_revenue,
        "Simulated next season"
    );
    Ok(Json(PlanResponse {
        success: true,
        data: result,
    }))
}

/// POST /api/plan/sales-summary
#[axum::debug_handler]
async fn sales_summary(
    payload: Result<Json<SalesSummaryRequest>, JsonRejection>,
) -> ApiResult<Json<PlanResponse<SalesPlanSummary>>> {
    let request = body(payload)?;
    let summary = summarize_sales_plan(&request.base, &request.plan)?;
    Ok(Json(PlanResponse {
        success: true,
        data: summary,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::routes::test_support::{empty_db, post_json, state};

    fn app() -> Router {
        routes().with_state(state(empty_db(), None))
    }

    #[tokio::test]
    async fn test_simulate_with_defaults() {
        let body = r#"{
            "channels": [
                { "channel": "백화점", "baseRevenue": 100000 },
                { "channel": "온라인", "baseRevenue": 50000 }
            ]
        }"#;
        let (status, json) = post_json(app(), "/api/plan/simulate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        // 5% common growth, 250% mark-up
        assert_eq!(json["data"]["totalRevenue"], 157_500.0);
        assert_eq!(json["data"]["totalCogs"], 63_000.0);
        assert_eq!(json["data"]["channelRevenues"][1]["planRevenue"], 52_500.0);
    }

    #[tokio::test]
    async fn test_simulate_rejects_zero_markup() {
        let body = r#"{ "channels": [], "targetMU": 0 }"#;
        let (status, json) = post_json(app(), "/api/plan/simulate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_simulate_rejects_malformed_body() {
        let (status, _) = post_json(app(), "/api/plan/simulate", r#"{"channels": 3}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sales_summary_totals() {
        let body = r#"{
            "base": [
                { "channelCode": "DEPT", "seasonCode": "25S", "categoryCode": "WEAR",
                  "salesTagAmt": 1000, "discountRate": 20 }
            ],
            "plan": [
                { "channelCode": "DEPT", "seasonCode": "26S", "categoryCode": "WEAR",
                  "salesTagAmt": 1000, "discountRate": 10 }
            ]
        }"#;
        let (status, json) = post_json(app(), "/api/plan/sales-summary", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"]["base"], 800.0);
        assert_eq!(json["data"]["total"]["plan"], 900.0);
        assert_eq!(json["data"]["total"]["changeRate"], 12.5);
        assert_eq!(json["data"]["byChannel"][0]["name"], "백화점");
    }

    #[tokio::test]
    async fn test_sales_summary_rejects_bad_discount() {
        let body = r#"{
            "plan": [
                { "channelCode": "DF", "seasonCode": "26S", "categoryCode": "BAG",
                  "salesTagAmt": 1000, "discountRate": 120 }
            ]
        }"#;
        let (status, _) = post_json(app(), "/api/plan/sales-summary", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_simulate_overflow_is_400() {
        let huge_cost = r#"{
            "channels": [{ "channel": "백화점", "baseRevenue": 100000 }],
            "headcount": "100000000000000000000",
            "hrCostPerPerson": "100000000000000000000"
        }"#;
        let (status, json) = post_json(app(), "/api/plan/simulate", huge_cost).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("hrCost"));

        let tiny_markup = r#"{
            "channels": [{ "channel": "백화점", "baseRevenue": "79000000000000000000000000" }],
            "targetMU": "0.0000000000000000000000000001"
        }"#;
        let (status, json) = post_json(app(), "/api/plan/simulate", tiny_markup).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("totalCogs"));
    }

    #[tokio::test]
    async fn test_sales_summary_overflow_is_400() {
        let body = r#"{
            "plan": [
                { "channelCode": "DEPT", "seasonCode": "26S", "categoryCode": "WEAR",
                  "salesTagAmt": "79000000000000000000000000000", "discountRate": 0 },
                { "channelCode": "DEPT", "seasonCode": "26S", "categoryCode": "WEAR",
                  "salesTagAmt": "79000000000000000000000000000", "discountRate": 0 }
            ]
        }"#;
        let (status, json) = post_json(app(), "/api/plan/sales-summary", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }
}
