//! End-of-season stock by item label.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{CatalogVintage, ItemClass, classify, stock_label};
use crate::season::{SeasonWindow, YearMonth};

use super::facts::StockFact;
use super::ratio::{to_millions, yoy};

const SEASON_PREFIX: &str = "SEASON_";
const SEASON_ITEM_PREFIX: &str = "SEASON_ITEM_";

/// One end-stock line.
///
/// Item lines carry a YoY and no season. Season lines are keyed
/// `SEASON_{sesn}` and season-item lines `SEASON_ITEM_{sesn}_{item}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndStockRow {
    /// Item label or synthetic season key.
    #[serde(rename = "ITEM_STD")]
    pub item: String,
    /// Stock season for the season views.
    #[serde(rename = "SESN")]
    pub season: Option<String>,
    /// Current-year stock TAG amount in millions.
    #[serde(rename = "CY_END_STOCK_TAG_AMT")]
    pub amount: Decimal,
    /// Year-over-year index for item lines.
    #[serde(rename = "YOY")]
    pub yoy: Option<Decimal>,
}

/// End-stock report for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndStockReport {
    /// Item lines, then season lines, then season-item lines.
    pub rows: Vec<EndStockRow>,
    /// Stock month for the current year.
    pub target_month: YearMonth,
    /// Stock month for the prior year.
    pub prior_month: YearMonth,
}

impl EndStockReport {
    /// Sum of the item lines in millions.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.rows
            .iter()
            .filter(|row| row.season.is_none())
            .map(|row| row.amount)
            .sum()
    }
}

#[derive(Default)]
struct ItemLine {
    rank: usize,
    cy: Decimal,
    py: Decimal,
}

fn rank_of(class: ItemClass) -> usize {
    ItemClass::ALL
        .iter()
        .position(|c| *c == class)
        .unwrap_or(ItemClass::ALL.len())
}

fn label_and_rank(fact: &StockFact, window: &SeasonWindow, vintage: CatalogVintage) -> (String, usize) {
    fact.product.as_ref().map_or_else(
        || (ItemClass::Other.label().to_string(), rank_of(ItemClass::Other)),
        |product| {
            (
                stock_label(product, window, vintage),
                rank_of(classify(product, window)),
            )
        },
    )
}

/// Aggregates end-of-period stock for a window.
///
/// `cy_facts` are the stock rows at `period_end` and `py_facts` the rows twelve
/// months earlier. Prior-year products are labelled against the prior-year
/// window so their apparel seasons line up with the current year. Stock rows
/// whose product is missing from the catalog fall under `기타`.
#[must_use]
pub fn aggregate_end_stock(
    cy_facts: &[StockFact],
    py_facts: &[StockFact],
    window: &SeasonWindow,
) -> EndStockReport {
    let py_window = window.prior_year();
    let mut items: BTreeMap<String, ItemLine> = BTreeMap::new();
    let mut seasons: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut season_items: BTreeMap<(String, String), Decimal> = BTreeMap::new();

    for fact in cy_facts {
        let (label, rank) = label_and_rank(fact, window, CatalogVintage::Current);
        let line = items.entry(label.clone()).or_insert_with(|| ItemLine {
            rank,
            ..ItemLine::default()
        });
        line.cy += fact.amount;

        *seasons.entry(fact.stock_season.clone()).or_default() += fact.amount;
        *season_items
            .entry((fact.stock_season.clone(), label))
            .or_default() += fact.amount;
    }

    for fact in py_facts {
        let (label, rank) = label_and_rank(fact, &py_window, CatalogVintage::Prior);
        let line = items.entry(label).or_insert_with(|| ItemLine {
            rank,
            ..ItemLine::default()
        });
        line.py += fact.amount;
    }

    let mut item_rows: Vec<(usize, EndStockRow)> = items
        .into_iter()
        .map(|(label, line)| {
            (
                line.rank,
                EndStockRow {
                    item: label,
                    season: None,
                    amount: to_millions(line.cy),
                    yoy: yoy(line.cy, line.py),
                },
            )
        })
        .collect();
    item_rows.sort_by(|a, b| (a.0, &a.1.item).cmp(&(b.0, &b.1.item)));

    let season_rows = seasons.into_iter().map(|(season, amount)| EndStockRow {
        item: format!("{SEASON_PREFIX}{season}"),
        season: Some(season),
        amount: to_millions(amount),
        yoy: None,
    });

    let season_item_rows = season_items
        .into_iter()
        .map(|((season, label), amount)| EndStockRow {
            item: format!("{SEASON_ITEM_PREFIX}{season}_{label}"),
            season: Some(season),
            amount: to_millions(amount),
            yoy: None,
        });

    let rows = item_rows
        .into_iter()
        .map(|(_, row)| row)
        .chain(season_rows)
        .chain(season_item_rows)
        .collect();

    EndStockReport {
        rows,
        target_month: window.period_end,
        prior_month: py_window.period_end,
    }
}
