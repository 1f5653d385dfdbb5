//! Season codes and reporting windows.
//!
//! A season code such as `23S` or `24F` resolves to a [`SeasonWindow`]: the
//! months that make up the season, the earlier month from which current-season
//! apparel sales start counting, and the pivot month used to tell prior-season
//! apparel apart from aged stock.

pub mod error;
pub mod types;
pub mod window;


pub use error::SeasonError;
pub use types::{SeasonCode, SeasonType, YearMonth};
pub use window::SeasonWindow;
