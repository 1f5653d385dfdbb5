//! Planboard API Server
//!
//! Main entry point for the seasonal P&L backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planboard_api::insight::{InsightGenerator, OpenAiInsight};
use planboard_api::{AppState, create_router};
use planboard_db::connect;
use planboard_shared::AppConfig;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "planboard=debug,tower_http=debug".into());

    // LOG_FORMAT=json switches to one JSON object per line
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(&config.warehouse).await?;
    info!(
        max_connections = config.warehouse.max_connections,
        "Connected to warehouse"
    );

    let insight: Option<Arc<dyn InsightGenerator>> =
        match OpenAiInsight::from_config(&config.insight) {
            Ok(client) => {
                info!(model = %config.insight.model, "Insight provider configured");
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Historical insight disabled");
                None
            }
        };

    let state = AppState {
        db: Arc::new(db),
        insight,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
