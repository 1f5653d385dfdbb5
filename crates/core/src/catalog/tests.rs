//! Tests for item classification.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::season::{SeasonWindow, YearMonth};

fn ym(raw: &str) -> YearMonth {
    YearMonth::parse(raw).unwrap()
}

fn apparel(season: &str, start: &str, end: &str) -> ProductAttributes {
    ProductAttributes {
        category1: Some("의류".to_string()),
        category2: Some("Outer".to_string()),
        season: Some(season.to_string()),
        season_range: Some(SeasonRange {
            start: ym(start),
            end: ym(end),
        }),
    }
}

fn accessory(sub: &str) -> ProductAttributes {
    ProductAttributes {
        category1: Some("ACC".to_string()),
        category2: Some(sub.to_string()),
        season: Some("23N".to_string()),
        season_range: None,
    }
}

#[rstest]
#[case("202303", "202308", ItemClass::CurrentApparel)]
#[case("202209", "202302", ItemClass::PriorApparel)]
#[case("202309", "202402", ItemClass::FutureApparel)]
#[case("202203", "202208", ItemClass::AgedApparel)]
fn test_apparel_rules_for_23s(
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: ItemClass,
) {
    let window = SeasonWindow::parse("23S").unwrap();
    assert_eq!(classify(&apparel("23S", start, end), &window), expected);
}

#[test]
fn test_first_match_wins_when_range_covers_end_and_pivot() {
    let window = SeasonWindow::parse("23S").unwrap();
    let wide = apparel("23N", "202301", "202312");
    assert_eq!(classify(&wide, &window), ItemClass::CurrentApparel);
}

#[rstest]
#[case("Headwear", ItemClass::Headwear)]
#[case("Shoes", ItemClass::Shoes)]
#[case("Bag", ItemClass::Bag)]
#[case("Acc_etc", ItemClass::OtherAccessory)]
#[case("Socks", ItemClass::Other)]
fn test_accessory_rules(#[case] sub: &str, #[case] expected: ItemClass) {
    let window = SeasonWindow::parse("23S").unwrap();
    assert_eq!(classify(&accessory(sub), &window), expected);
}

#[test]
fn test_apparel_without_season_range_is_other() {
    let window = SeasonWindow::parse("23S").unwrap();
    let product = ProductAttributes {
        category1: Some("의류".to_string()),
        ..ProductAttributes::default()
    };
    assert_eq!(classify(&product, &window), ItemClass::Other);
}

#[test]
fn test_empty_product_is_other() {
    let window = SeasonWindow::parse("24F").unwrap();
    assert_eq!(
        classify(&ProductAttributes::default(), &window),
        ItemClass::Other
    );
}

#[test]
fn test_stock_label_current_catalog() {
    let window = SeasonWindow::parse("25S").unwrap();
    let product = apparel("25S", "202503", "202508");
    assert_eq!(
        stock_label(&product, &window, CatalogVintage::Current),
        "25S 의류"
    );
}

#[test]
fn test_stock_label_prior_catalog_shifts_year_forward() {
    let py_window = SeasonWindow::parse("25S").unwrap().prior_year();
    let product = apparel("24S", "202403", "202408");
    assert_eq!(
        stock_label(&product, &py_window, CatalogVintage::Prior),
        "25S 의류"
    );

    let prior = apparel("23F", "202309", "202402");
    assert_eq!(
        stock_label(&prior, &py_window, CatalogVintage::Prior),
        "24F 의류"
    );
}

#[test]
fn test_stock_label_maps_n_to_s() {
    let window = SeasonWindow::parse("25S").unwrap();
    let product = apparel("25N", "202501", "202512");
    assert_eq!(
        stock_label(&product, &window, CatalogVintage::Current),
        "25S 의류"
    );
}

#[test]
fn test_stock_label_non_apparel_uses_class_label() {
    let window = SeasonWindow::parse("25S").unwrap();
    assert_eq!(
        stock_label(&accessory("Bag"), &window, CatalogVintage::Current),
        "가방"
    );
    let aged = apparel("22S", "202203", "202208");
    assert_eq!(
        stock_label(&aged, &window, CatalogVintage::Current),
        "과시즌 의류"
    );
}

fn product_strategy() -> impl Strategy<Value = ProductAttributes> {
    let category1 = prop_oneof![
        Just(Some("의류".to_string())),
        Just(Some("ACC".to_string())),
        Just(Some("용품".to_string())),
        Just(None),
    ];
    let category2 = prop_oneof![
        Just(Some("Headwear".to_string())),
        Just(Some("Shoes".to_string())),
        Just(Some("Bag".to_string())),
        Just(Some("Acc_etc".to_string())),
        Just(Some("Top".to_string())),
        Just(None),
    ];
    let range = prop::option::of((0i32..120, 0i32..12)).prop_map(|r| {
        r.map(|(offset, len)| {
            let start = YearMonth::new(2018, 1).unwrap().add_months(offset);
            SeasonRange {
                start,
                end: start.add_months(len),
            }
        })
    });
    (category1, category2, range).prop_map(|(category1, category2, season_range)| {
        ProductAttributes {
            category1,
            category2,
            season: None,
            season_range,
        }
    })
}

fn window_strategy() -> impl Strategy<Value = SeasonWindow> {
    (19u8..27, prop_oneof![Just('S'), Just('F'), Just('N')])
        .prop_map(|(year, suffix)| SeasonWindow::parse(&format!("{year}{suffix}")).unwrap())
}

proptest! {
    /// Feature: item-classifier, Property 1: Current and prior apparel are mutually exclusive
    /// A product classified as current-season apparel never also satisfies the
    /// prior-season rule ahead of it, and apparel classes only go to apparel.
    #[test]
    fn prop_apparel_classes_only_for_apparel(
        product in product_strategy(),
        window in window_strategy(),
    ) {
        let class = classify(&product, &window);
        if class.is_apparel() {
            prop_assert!(product.is_apparel());
            prop_assert!(product.season_range.is_some());
        }
        if class == ItemClass::PriorApparel {
            let range = product.season_range.unwrap();
            prop_assert!(!range.contains(window.period_end));
        }
    }

    /// Feature: item-classifier, Property 2: Classification is a pure function
    #[test]
    fn prop_classification_is_deterministic(
        product in product_strategy(),
        window in window_strategy(),
    ) {
        prop_assert_eq!(classify(&product, &window), classify(&product, &window));
    }
}
