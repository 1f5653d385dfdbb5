//! Season-over-season comparisons.
//!
//! Series are ordered oldest first. Every result is `None` when the reference
//! value is missing or zero.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::ratio::round_dp;

/// `current / reference * 100`, one decimal place.
#[must_use]
pub fn ratio_to(current: Option<Decimal>, reference: Option<Decimal>) -> Option<Decimal> {
    let (current, reference) = (current?, reference?);
    if reference.is_zero() {
        return None;
    }
    Some(round_dp(current / reference * Decimal::ONE_HUNDRED, 1))
}

/// Signed change `(current - previous) / previous * 100`, one decimal place.
#[must_use]
pub fn percent_change(current: Option<Decimal>, previous: Option<Decimal>) -> Option<Decimal> {
    let (current, previous) = (current?, previous?);
    if previous.is_zero() {
        return None;
    }
    Some(round_dp(
        (current - previous) / previous * Decimal::ONE_HUNDRED,
        1,
    ))
}

/// Percentage-point difference between two rates.
#[must_use]
pub fn point_change(current: Option<Decimal>, previous: Option<Decimal>) -> Option<Decimal> {
    Some(round_dp(current? - previous?, 1))
}

/// Comparison of one season against the rest of its series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesComparison {
    /// Ratio to the immediately prior season.
    pub vs_previous: Option<Decimal>,
    /// Ratio to the first season. Only set when the series has more than two
    /// seasons.
    pub vs_first: Option<Decimal>,
    /// Signed change from the prior season.
    pub change: Option<Decimal>,
}

/// Compares every point of a series with its predecessor and with the first
/// point. The first point has nothing to compare against.
#[must_use]
pub fn compare_series(values: &[Option<Decimal>]) -> Vec<SeriesComparison> {
    let first = values.first().copied().flatten();
    let with_first = values.len() > 2;

    values
        .iter()
        .enumerate()
        .map(|(i, current)| {
            if i == 0 {
                return SeriesComparison::default();
            }
            let previous = values[i - 1];
            SeriesComparison {
                vs_previous: ratio_to(*current, previous),
                vs_first: if with_first {
                    ratio_to(*current, first)
                } else {
                    None
                },
                change: percent_change(*current, previous),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio_to() {
        assert_eq!(ratio_to(Some(dec!(120)), Some(dec!(100))), Some(dec!(120.0)));
        assert_eq!(ratio_to(Some(dec!(1)), Some(dec!(3))), Some(dec!(33.3)));
        assert_eq!(ratio_to(Some(dec!(1)), Some(Decimal::ZERO)), None);
        assert_eq!(ratio_to(Some(dec!(1)), None), None);
        assert_eq!(ratio_to(None, Some(dec!(1))), None);
    }

    #[test]
    fn test_percent_change_is_signed() {
        assert_eq!(percent_change(Some(dec!(90)), Some(dec!(100))), Some(dec!(-10.0)));
        assert_eq!(percent_change(Some(dec!(-50)), Some(dec!(-100))), Some(dec!(-50.0)));
        assert_eq!(percent_change(Some(dec!(5)), Some(Decimal::ZERO)), None);
    }

    #[test]
    fn test_point_change() {
        assert_eq!(point_change(Some(dec!(32.5)), Some(dec!(30.1))), Some(dec!(2.4)));
        assert_eq!(point_change(None, Some(dec!(30))), None);
    }

    #[test]
    fn test_compare_series_three_seasons() {
        let result = compare_series(&[Some(dec!(100)), Some(dec!(110)), Some(dec!(121))]);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], SeriesComparison::default());
        assert_eq!(result[1].vs_previous, Some(dec!(110.0)));
        assert_eq!(result[1].vs_first, Some(dec!(110.0)));
        assert_eq!(result[2].vs_previous, Some(dec!(110.0)));
        assert_eq!(result[2].vs_first, Some(dec!(121.0)));
        assert_eq!(result[2].change, Some(dec!(10.0)));
    }

    #[test]
    fn test_compare_series_two_seasons_has_no_vs_first() {
        let result = compare_series(&[Some(dec!(100)), Some(dec!(80))]);
        assert_eq!(result[1].vs_previous, Some(dec!(80.0)));
        assert_eq!(result[1].vs_first, None);
    }

    #[test]
    fn test_compare_series_missing_reference() {
        let result = compare_series(&[None, Some(dec!(80)), Some(dec!(90))]);
        assert_eq!(result[1].vs_previous, None);
        assert_eq!(result[2].vs_first, None);
        assert_eq!(result[2].vs_previous, Some(dec!(112.5)));
    }
}
