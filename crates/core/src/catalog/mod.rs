//! Product item classification.
//!
//! Every fact row carries the attributes of its product: category levels,
//! season code and the month range of that season. The classifier turns those
//! attributes into one of nine item classes relative to a [`SeasonWindow`].
//!
//! [`SeasonWindow`]: crate::season::SeasonWindow

pub mod classify;
pub mod types;

#[cfg(test)]
mod tests;

pub use classify::{classify, stock_label, CatalogVintage};
pub use types::{ItemClass, ProductAttributes, SeasonRange};
