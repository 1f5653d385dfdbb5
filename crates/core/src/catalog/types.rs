//! Catalog types.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::season::YearMonth;

/// Category level 1 value for apparel.
pub const APPAREL: &str = "의류";
/// Category level 1 value for accessories.
pub const ACCESSORY: &str = "ACC";

/// Inclusive month range of a product season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRange {
    /// First month.
    pub start: YearMonth,
    /// Last month.
    pub end: YearMonth,
}

impl SeasonRange {
    /// Whether `month` lies within the range.
    #[must_use]
    pub fn contains(&self, month: YearMonth) -> bool {
        (self.start..=self.end).contains(&month)
    }
}

/// The product attributes classification depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductAttributes {
    /// Category level 1 (`의류`, `ACC`, ...).
    pub category1: Option<String>,
    /// Category level 2 (`Headwear`, `Shoes`, ...).
    pub category2: Option<String>,
    /// Product season code as stored in the catalog (`23S`, `24N`, ...).
    pub season: Option<String>,
    /// Month range of the product season. Missing when the season master has
    /// no entry.
    pub season_range: Option<SeasonRange>,
}

impl ProductAttributes {
    /// Whether the product is apparel.
    #[must_use]
    pub fn is_apparel(&self) -> bool {
        self.category1.as_deref() == Some(APPAREL)
    }

    /// Whether the product is an accessory.
    #[must_use]
    pub fn is_accessory(&self) -> bool {
        self.category1.as_deref() == Some(ACCESSORY)
    }
}

/// Item class of a product relative to a season window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemClass {
    /// Apparel whose season covers the window end.
    CurrentApparel,
    /// Apparel whose season covers the pivot month.
    PriorApparel,
    /// Apparel whose season starts after the window.
    FutureApparel,
    /// Apparel from seasons before the pivot.
    AgedApparel,
    /// Accessory: headwear.
    Headwear,
    /// Accessory: shoes.
    Shoes,
    /// Accessory: bags.
    Bag,
    /// Any other accessory sub-category listed in the catalog.
    OtherAccessory,
    /// Anything else.
    Other,
}

impl ItemClass {
    /// All classes in reporting order.
    pub const ALL: [Self; 9] = [
        Self::CurrentApparel,
        Self::PriorApparel,
        Self::FutureApparel,
        Self::AgedApparel,
        Self::Headwear,
        Self::Shoes,
        Self::Bag,
        Self::OtherAccessory,
        Self::Other,
    ];

    /// Korean report label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CurrentApparel => "당시즌 의류",
            Self::PriorApparel => "전시즌 의류",
            Self::FutureApparel => "차기시즌 의류",
            Self::AgedApparel => "과시즌 의류",
            Self::Headwear => "모자",
            Self::Shoes => "신발",
            Self::Bag => "가방",
            Self::OtherAccessory => "기타ACC",
            Self::Other => "기타",
        }
    }

    /// Whether the class is apparel of any vintage.
    #[must_use]
    pub const fn is_apparel(self) -> bool {
        matches!(
            self,
            Self::CurrentApparel | Self::PriorApparel | Self::FutureApparel | Self::AgedApparel
        )
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ItemClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
