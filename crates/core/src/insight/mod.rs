//! Historical insight prompt construction.
//!
//! The dashboard posts per-season P&L snapshots; this module turns them into
//! the CSV-style prompt sent to the language model. The model call itself
//! lives in the API crate.

pub mod prompt;
pub mod types;

pub use prompt::{HISTORICAL_SEASONS, SYSTEM_PROMPT, build_historical_prompt};
pub use types::{ChannelAmount, DirectCostSnapshot, HistoricalInsightInput, SeasonSnapshot};
