//! Item classification rules.

use crate::season::{SeasonCode, SeasonType, SeasonWindow};

use super::types::{ItemClass, ProductAttributes};

/// Classifies a product relative to a season window.
///
/// Rules are evaluated in order and the first match wins, so a range that
/// covers both the window end and the pivot is current-season apparel.
/// Apparel without a season range matches none of the apparel rules.
#[must_use]
pub fn classify(product: &ProductAttributes, window: &SeasonWindow) -> ItemClass {
    if product.is_apparel() {
        if let Some(range) = product.season_range {
            if range.contains(window.period_end) {
                return ItemClass::CurrentApparel;
            }
            if range.contains(window.pivot) {
                return ItemClass::PriorApparel;
            }
            if range.start > window.period_end {
                return ItemClass::FutureApparel;
            }
            if range.start < window.pivot {
                return ItemClass::AgedApparel;
            }
        }
    }

    if product.is_accessory() {
        match product.category2.as_deref() {
            Some("Headwear") => return ItemClass::Headwear,
            Some("Shoes") => return ItemClass::Shoes,
            Some("Bag") => return ItemClass::Bag,
            Some("Acc_etc") => return ItemClass::OtherAccessory,
            _ => {}
        }
    }

    ItemClass::Other
}

/// Which catalog a stock row was classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogVintage {
    /// The requested season's catalog.
    Current,
    /// The prior-year catalog, relabelled to line up with the current year.
    Prior,
}

/// End-stock bucket label for a product.
///
/// Current and prior-season apparel are labelled by their own season
/// (`"25S 의류"`); a prior-year product is shifted one year forward so that
/// last year's `24S` stock sits next to this year's `25S` stock. `N` seasons
/// are reported under `S`. Everything else uses the item class label.
#[must_use]
pub fn stock_label(
    product: &ProductAttributes,
    window: &SeasonWindow,
    vintage: CatalogVintage,
) -> String {
    let class = classify(product, window);
    if !matches!(class, ItemClass::CurrentApparel | ItemClass::PriorApparel) {
        return class.label().to_string();
    }

    let season = product.season.as_deref().unwrap_or_default();
    let category = product.category1.as_deref().unwrap_or_default();
    format!("{} {category}", relabel_season(season, vintage))
}

fn relabel_season(raw: &str, vintage: CatalogVintage) -> String {
    let Ok(code) = SeasonCode::parse(raw) else {
        return raw.to_string();
    };

    let kind = match code.kind() {
        SeasonType::NonSeasonal => SeasonType::SpringSummer,
        other => other,
    };
    let year = match vintage {
        CatalogVintage::Current => code.short_year(),
        CatalogVintage::Prior => code.short_year().saturating_add(1),
    };

    SeasonCode::new(year, kind).map_or_else(|_| raw.to_string(), |c| c.to_string())
}
