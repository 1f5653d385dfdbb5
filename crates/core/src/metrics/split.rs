//! The seasonal split shared by every flow aggregator.
//!
//! Current-season apparel is counted from `current_season_start`, everything
//! else from `period_start`, and future-season apparel is never counted.
//! Rows outside their bucket's range land in [`Bucket::Excluded`] so the three
//! buckets always partition the input.

use rust_decimal::Decimal;

use crate::catalog::ItemClass;
use crate::season::{SeasonWindow, YearMonth};

use super::ratio::to_millions;

/// Which part of the seasonal split a fact row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Current-season apparel inside `current_season_start..=period_end`.
    CurrentApparel,
    /// Every other counted class inside `period_start..=period_end`.
    Other,
    /// Not counted.
    Excluded,
}

impl Bucket {
    /// Whether the bucket contributes to report totals.
    #[must_use]
    pub const fn is_counted(self) -> bool {
        !matches!(self, Self::Excluded)
    }
}

/// Places a classified row in its bucket.
#[must_use]
pub fn bucket_for(class: ItemClass, month: YearMonth, window: &SeasonWindow) -> Bucket {
    match class {
        ItemClass::CurrentApparel if window.in_current_season_range(month) => {
            Bucket::CurrentApparel
        }
        ItemClass::CurrentApparel | ItemClass::FutureApparel => Bucket::Excluded,
        _ if window.in_period(month) => Bucket::Other,
        _ => Bucket::Excluded,
    }
}

/// Running totals per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitTotals {
    /// Current-season apparel.
    pub current: Decimal,
    /// Everything else counted.
    pub other: Decimal,
    /// Not counted.
    pub excluded: Decimal,
}

impl SplitTotals {
    /// Adds an amount to a bucket.
    pub fn add(&mut self, bucket: Bucket, amount: Decimal) {
        match bucket {
            Bucket::CurrentApparel => self.current += amount,
            Bucket::Other => self.other += amount,
            Bucket::Excluded => self.excluded += amount,
        }
    }

    /// Sum of the counted buckets.
    #[must_use]
    pub fn counted(&self) -> Decimal {
        self.current + self.other
    }

    /// Counted total in millions, each bucket rounded on its own first.
    #[must_use]
    pub fn counted_millions_by_bucket(&self) -> Decimal {
        to_millions(self.current) + to_millions(self.other)
    }
}
