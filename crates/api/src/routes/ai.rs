//! Historical insight route.
//!
//! Failures answer `{ "error": ... }` without a `success` flag.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use planboard_core::insight::{HistoricalInsightInput, SYSTEM_PROMPT, build_historical_prompt};
use serde_json::json;
use tracing::{error, info, warn};

use crate::AppState;

/// Reply when no insight provider is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "OpenAI API Key가 설정되지 않았습니다. 서버 환경 변수에서 OPENAI_API_KEY를 확인해주세요.";

/// Reply to a malformed request.
pub const INVALID_REQUEST_MESSAGE: &str = "유효하지 않은 요청입니다.";

/// Creates the insight routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/ai/historical-insight", post(historical_insight))
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// POST /api/ai/historical-insight
#[axum::debug_handler]
async fn historical_insight(
    State(state): State<AppState>,
    body: Result<Json<HistoricalInsightInput>, JsonRejection>,
) -> Response {
    let Some(generator) = state.insight.clone() else {
        error!("Insight requested but no API key is configured");
        return failure(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE);
    };

    let input = match body {
        Ok(Json(input)) if !input.brand.trim().is_empty() => input,
        Ok(_) => return failure(StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected insight request");
            return failure(StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE);
        }
    };

    let prompt = build_historical_prompt(&input);
    info!(brand = %input.brand, prompt_len = prompt.len(), "Requesting historical insight");

    match generator.generate(SYSTEM_PROMPT, &prompt).await {
        Ok(insight) => {
            if insight.is_empty() {
                warn!(brand = %input.brand, "Insight provider returned an empty reply");
            }
            (StatusCode::OK, Json(json!({ "insight": insight }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to generate insight");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
