//! Common types used across the application.

pub mod brand;

pub use brand::{BrandCode, BrandCodeError};
