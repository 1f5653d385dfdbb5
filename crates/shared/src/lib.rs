//! Shared types, errors, and configuration for Planboard.
//!
//! This crate provides common types used across all other crates:
//! - Validated brand codes
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::BrandCode;
