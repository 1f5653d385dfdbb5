//! Repository abstractions for warehouse access.
//!
//! Statements only group and sum; classification, channel mapping and the
//! seasonal split happen in the core crate on the returned facts.

mod rows;
pub mod warehouse;


pub use warehouse::{ColumnInfo, CostCenterCategory, WarehouseError, WarehouseRepository};
