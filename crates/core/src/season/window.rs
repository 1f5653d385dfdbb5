//! Season window resolution.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::SeasonError;
use super::types::{SeasonCode, SeasonType, YearMonth};

/// The months a season report covers.
///
/// Current-season apparel starts selling before the season opens, so it is
/// counted from `current_season_start`; everything else is counted over
/// `period_start..=period_end`. `pivot` is the month used to recognise the
/// previous season's apparel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonWindow {
    /// Season the window was resolved from.
    pub season: SeasonCode,
    /// First month of the season.
    pub period_start: YearMonth,
    /// Last month of the season.
    pub period_end: YearMonth,
    /// First month counted for current-season apparel.
    pub current_season_start: YearMonth,
    /// Pivot month for prior-season apparel.
    pub pivot: YearMonth,
}

impl SeasonWindow {
    /// Resolves the window for a season code.
    pub fn resolve(season: SeasonCode) -> Result<Self, SeasonError> {
        let year = season.full_year();
        let ym = YearMonth::new;

        let window = match season.kind() {
            SeasonType::SpringSummer => Self {
                season,
                period_start: ym(year, 3)?,
                period_end: ym(year, 8)?,
                current_season_start: ym(year - 1, 1)?,
                pivot: ym(year, 2)?,
            },
            SeasonType::FallWinter => Self {
                season,
                period_start: ym(year, 9)?,
                period_end: ym(year + 1, 2)?,
                current_season_start: ym(year, 3)?,
                pivot: ym(year, 8)?,
            },
            SeasonType::NonSeasonal => Self {
                season,
                period_start: ym(year, 1)?,
                period_end: ym(year, 12)?,
                current_season_start: ym(year - 1, 7)?,
                pivot: ym(year, 8)?,
            },
        };
        Ok(window)
    }

    /// Parses a season code and resolves its window.
    pub fn parse(raw: &str) -> Result<Self, SeasonError> {
        Self::resolve(SeasonCode::parse(raw)?)
    }

    /// The same window one year earlier. Every bound moves back 12 months.
    #[must_use]
    pub fn prior_year(&self) -> Self {
        Self {
            season: self.season.prior_year().unwrap_or(self.season),
            period_start: self.period_start.add_months(-12),
            period_end: self.period_end.add_months(-12),
            current_season_start: self.current_season_start.add_months(-12),
            pivot: self.pivot.add_months(-12),
        }
    }

    /// Whether `month` falls inside `period_start..=period_end`.
    #[must_use]
    pub fn in_period(&self, month: YearMonth) -> bool {
        (self.period_start..=self.period_end).contains(&month)
    }

    /// Whether `month` falls inside `current_season_start..=period_end`.
    #[must_use]
    pub fn in_current_season_range(&self, month: YearMonth) -> bool {
        (self.current_season_start..=self.period_end).contains(&month)
    }

    /// Earliest month any bucket of this window reads.
    #[must_use]
    pub fn earliest_month(&self) -> YearMonth {
        self.current_season_start.min(self.period_start)
    }

    /// First calendar day of the season.
    #[must_use]
    pub fn period_start_date(&self) -> NaiveDate {
        self.period_start.first_day()
    }

    /// Last calendar day of the season.
    #[must_use]
    pub fn period_end_date(&self) -> NaiveDate {
        self.period_end.last_day()
    }
}
