//! VAT-excluded revenue and shipping price (V+).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::classify;
use crate::channel::{Channel, normalize};
use crate::season::SeasonWindow;

use super::facts::SalesFact;
use super::ratio::{VAT_FACTOR, round_dp, to_millions};
use super::split::bucket_for;

/// One channel line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VatChannelRow {
    /// Channel.
    pub channel: Channel,
    /// VAT-excluded revenue in millions.
    pub vat_excluded: Decimal,
    /// Actual sales in millions.
    pub actual: Decimal,
    /// Shipping price (V+) in millions.
    pub shipping_price: Decimal,
}

/// VAT-excluded revenue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VatExcludedReport {
    /// Channel lines in display order.
    pub channels: Vec<VatChannelRow>,
    /// Total VAT-excluded revenue in millions.
    pub total_vat_excluded: Decimal,
    /// Total actual sales in millions.
    pub total_actual: Decimal,
    /// Sum of the per-channel shipping prices.
    pub shipping_total: Decimal,
}

/// Shipping price for one channel, in whole millions.
///
/// VAT-excluded revenue grossed up by 1.1. Retail channels never ship above
/// their actual sale price.
#[must_use]
pub fn shipping_price(channel: &Channel, vat_excluded: Decimal, actual: Decimal) -> Decimal {
    let grossed = vat_excluded * VAT_FACTOR;
    let capped = if channel.caps_shipping_at_actual() && actual > Decimal::ZERO && grossed > actual
    {
        actual
    } else {
        grossed
    };
    round_dp(capped, 0)
}

/// Aggregates VAT-excluded revenue and actual sales by channel.
#[must_use]
pub fn aggregate_vat_excluded(facts: &[SalesFact], window: &SeasonWindow) -> VatExcludedReport {
    let mut sums: BTreeMap<Channel, (Decimal, Decimal)> = BTreeMap::new();
    for fact in facts {
        let Some(channel) = normalize(&fact.channel) else {
            continue;
        };
        if !bucket_for(classify(&fact.product, window), fact.month, window).is_counted() {
            continue;
        }
        let entry = sums.entry(channel).or_default();
        entry.0 += fact.vat_excluded_amount;
        entry.1 += fact.actual_amount;
    }

    let mut channels: Vec<VatChannelRow> = sums
        .iter()
        .map(|(channel, (vat_excluded, actual))| {
            let vat_excluded = to_millions(*vat_excluded);
            let actual = to_millions(*actual);
            VatChannelRow {
                channel: channel.clone(),
                vat_excluded,
                actual,
                shipping_price: shipping_price(channel, vat_excluded, actual),
            }
        })
        .collect();
    channels.sort_by(|a, b| a.channel.sort_key().cmp(&b.channel.sort_key()));

    let total_vat_excluded: Decimal = sums.values().map(|(v, _)| *v).sum();
    let total_actual: Decimal = sums.values().map(|(_, a)| *a).sum();
    let shipping_total = channels.iter().map(|row| row.shipping_price).sum();

    VatExcludedReport {
        channels,
        total_vat_excluded: to_millions(total_vat_excluded),
        total_actual: to_millions(total_actual),
        shipping_total,
    }
}
