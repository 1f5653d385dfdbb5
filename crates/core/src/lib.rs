//! Core business logic for Planboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Warehouse rows come in as plain facts; everything seasonal happens here.
//!
//! # Modules
//!
//! - `season` - Season codes and reporting windows
//! - `catalog` - Product item classification
//! - `channel` - Sales channel normalization and ordering
//! - `metrics` - Per-report aggregators (sales, costs, stock, expenses)
//! - `pnl` - P&L cascade and percent-of-revenue ratios
//! - `compare` - Season-over-season comparison arithmetic
//! - `brand` - Brand registry and brand-specific rules
//! - `insight` - Historical insight prompt construction
//! - `planning` - Next-season scenario simulation

pub mod brand;
pub mod catalog;
pub mod channel;
pub mod compare;
pub mod insight;
pub mod metrics;
pub mod planning;
pub mod pnl;
pub mod season;
