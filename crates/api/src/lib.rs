//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - P&L report routes over the warehouse
//! - The historical insight route and its chat-completions client
//! - Next-season planning routes
//! - Error-to-response mapping

pub mod error;
pub mod insight;
pub mod reports;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::insight::InsightGenerator;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Warehouse connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Insight generator. `None` when no API key is configured.
    pub insight: Option<Arc<dyn InsightGenerator>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
