//! Warehouse access layer.
//!
//! This crate provides:
//! - A pooled `SeaORM` connection configured from [`WarehouseConfig`]
//! - The warehouse repository, which runs bound statements and maps the
//!   grouped rows into core fact types

pub mod repositories;

pub use repositories::{ColumnInfo, CostCenterCategory, WarehouseError, WarehouseRepository};

use std::time::Duration;

use planboard_shared::config::WarehouseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Opens the warehouse connection pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &WarehouseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .sqlx_logging(false);

    Database::connect(options).await
}
