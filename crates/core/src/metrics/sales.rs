//! Sales-tag and actual-sales aggregation by channel.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::classify;
use crate::channel::{Channel, RETAIL_CHANNEL_CODES, normalize};
use crate::season::SeasonWindow;

use super::facts::SalesFact;
use super::ratio::{to_millions, yoy};
use super::split::bucket_for;

/// Which sales amount to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesMeasure {
    /// Sales at TAG price.
    Tag,
    /// Sales at actual price.
    Actual,
}

impl SalesMeasure {
    fn of(self, fact: &SalesFact) -> Decimal {
        match self {
            Self::Tag => fact.tag_amount,
            Self::Actual => fact.actual_amount,
        }
    }
}

/// One channel line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSalesRow {
    /// Channel.
    pub channel: Channel,
    /// Current-year amount in millions.
    pub amount: Decimal,
    /// Prior-year amount in millions.
    pub amount_py: Decimal,
    /// Year-over-year index.
    pub yoy: Option<Decimal>,
}

/// Current-year amount per raw channel code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCodeAmount {
    /// Raw channel code.
    pub code: String,
    /// Amount in millions.
    pub amount: Decimal,
}

/// Channel sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSalesReport {
    /// Channel lines in display order.
    pub channels: Vec<ChannelSalesRow>,
    /// Current-year total in millions.
    pub total: Decimal,
    /// Prior-year total in millions.
    pub total_py: Decimal,
    /// Year-over-year index of the totals.
    pub total_yoy: Option<Decimal>,
    /// Current-year amounts per raw channel code.
    pub by_code: Vec<ChannelCodeAmount>,
    /// Current-year total over the retail channel codes, in millions.
    pub retail_total: Decimal,
}

#[derive(Default)]
struct WindowSums {
    by_channel: BTreeMap<Channel, Decimal>,
    by_code: BTreeMap<String, Decimal>,
    total: Decimal,
}

fn sum_window(facts: &[SalesFact], window: &SeasonWindow, measure: SalesMeasure) -> WindowSums {
    let mut sums = WindowSums::default();
    for fact in facts {
        let Some(channel) = normalize(&fact.channel) else {
            continue;
        };
        let bucket = bucket_for(classify(&fact.product, window), fact.month, window);
        if !bucket.is_counted() {
            continue;
        }

        let amount = measure.of(fact);
        *sums.by_channel.entry(channel).or_default() += amount;
        if let Some(code) = &fact.channel.raw_code {
            *sums.by_code.entry(code.clone()).or_default() += amount;
        }
        sums.total += amount;
    }
    sums
}

fn code_order(code: &str) -> (u32, &str) {
    (code.parse().unwrap_or(u32::MAX), code)
}

/// Aggregates sales by channel for a window and its prior year.
///
/// Channels present in either year appear once; a channel missing in one
/// year counts as zero there.
#[must_use]
pub fn aggregate_sales(
    cy_facts: &[SalesFact],
    py_facts: &[SalesFact],
    window: &SeasonWindow,
    measure: SalesMeasure,
) -> ChannelSalesReport {
    let cy = sum_window(cy_facts, window, measure);
    let py = sum_window(py_facts, &window.prior_year(), measure);

    let mut channels: Vec<Channel> = cy
        .by_channel
        .keys()
        .chain(py.by_channel.keys())
        .cloned()
        .collect();
    channels.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    channels.dedup();

    let rows = channels
        .into_iter()
        .map(|channel| {
            let cy_amount = cy.by_channel.get(&channel).copied().unwrap_or_default();
            let py_amount = py.by_channel.get(&channel).copied().unwrap_or_default();
            ChannelSalesRow {
                channel,
                amount: to_millions(cy_amount),
                amount_py: to_millions(py_amount),
                yoy: yoy(cy_amount, py_amount),
            }
        })
        .collect();

    let mut by_code: Vec<ChannelCodeAmount> = cy
        .by_code
        .iter()
        .map(|(code, amount)| ChannelCodeAmount {
            code: code.clone(),
            amount: to_millions(*amount),
        })
        .collect();
    by_code.sort_by(|a, b| code_order(&a.code).cmp(&code_order(&b.code)));

    let retail: Decimal = cy
        .by_code
        .iter()
        .filter(|(code, _)| RETAIL_CHANNEL_CODES.contains(&code.as_str()))
        .map(|(_, amount)| *amount)
        .sum();

    ChannelSalesReport {
        channels: rows,
        total: to_millions(cy.total),
        total_py: to_millions(py.total),
        total_yoy: yoy(cy.total, py.total),
        by_code,
        retail_total: to_millions(retail),
    }
}
