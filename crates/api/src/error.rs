//! Error-to-response mapping.
//!
//! Report routes answer failures with `{ "success": false, "error": ... }`.
//! Server-side failures are logged before they leave the handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use planboard_core::planning::PlanningError;
use planboard_core::season::SeasonError;
use planboard_db::WarehouseError;
use planboard_shared::AppError;
use planboard_shared::types::BrandCodeError;
use serde_json::json;
use tracing::error;

/// Handler error carrying an [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for report handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Invalid request parameter.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        }
        (
            status,
            Json(json!({
                "success": false,
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<WarehouseError> for ApiError {
    fn from(err: WarehouseError) -> Self {
        Self(AppError::Warehouse(err.to_string()))
    }
}

impl From<SeasonError> for ApiError {
    fn from(err: SeasonError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<BrandCodeError> for ApiError {
    fn from(err: BrandCodeError) -> Self {
        Self(AppError::from(err))
    }
}

impl From<PlanningError> for ApiError {
    fn from(err: PlanningError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}
