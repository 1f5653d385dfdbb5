//! Brand registry endpoint.

use axum::{Json, Router, routing::get};
use planboard_core::brand::{BRANDS, Brand};

use crate::AppState;

async fn list_brands() -> Json<[Brand; BRANDS.len()]> {
    Json(BRANDS)
}

/// Creates brand routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/brands", get(list_brands))
}
