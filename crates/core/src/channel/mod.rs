//! Sales channel normalization.
//!
//! Warehouse rows identify a channel three ways: the raw channel code on the
//! fact row, and the management code and name on the shop master. The
//! normalizer folds those into one canonical [`Channel`] with a fixed display
//! order.

pub mod normalize;

pub use normalize::{
    is_reportable, normalize, Channel, ChannelKey, NON_REPORTABLE_CODE, RETAIL_CHANNEL_CODES,
};
