//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod ai;
pub mod brands;
pub mod diagnostics;
pub mod health;
pub mod plan;
pub mod pnl;
pub mod summary;

#[cfg(test)]
mod test_support;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(brands::routes())
        .merge(pnl::routes())
        .merge(summary::routes())
        .merge(diagnostics::routes())
        .merge(ai::routes())
        .merge(plan::routes())
}
