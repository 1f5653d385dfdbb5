//! Season code and calendar month types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::SeasonError;

/// A calendar month, rendered as `YYYYMM` the way the warehouse stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, validating `1..=12` and a four-digit year.
    pub fn new(year: i32, month: u32) -> Result<Self, SeasonError> {
        if (1..=12).contains(&month) && (1000..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(SeasonError::InvalidYearMonth(format!("{year:04}{month:02}")))
        }
    }

    /// Parses a `YYYYMM` string.
    pub fn parse(raw: &str) -> Result<Self, SeasonError> {
        let trimmed = raw.trim();
        if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SeasonError::InvalidYearMonth(raw.to_string()));
        }
        let year = trimmed[..4]
            .parse()
            .map_err(|_| SeasonError::InvalidYearMonth(raw.to_string()))?;
        let month = trimmed[4..]
            .parse()
            .map_err(|_| SeasonError::InvalidYearMonth(raw.to_string()))?;
        Self::new(year, month).map_err(|_| SeasonError::InvalidYearMonth(raw.to_string()))
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Shifts the month by `delta` months (negative moves backwards).
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn add_months(self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }

    /// Signed number of months from `self` to `other`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn months_until(self, other: Self) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// First calendar day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last calendar day of the month, leap years included.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.add_months(1)
            .first_day()
            .pred_opt()
            .unwrap_or_default()
    }

    /// Month containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = SeasonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Season type suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    /// Spring/summer, March to August.
    #[serde(rename = "S")]
    SpringSummer,
    /// Fall/winter, September to February of the next year.
    #[serde(rename = "F")]
    FallWinter,
    /// Non-seasonal, January to December.
    #[serde(rename = "N")]
    NonSeasonal,
}

impl SeasonType {
    /// Parses the single-letter suffix.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            'S' => Some(Self::SpringSummer),
            'F' => Some(Self::FallWinter),
            'N' => Some(Self::NonSeasonal),
            _ => None,
        }
    }

    /// Returns the single-letter suffix.
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::SpringSummer => 'S',
            Self::FallWinter => 'F',
            Self::NonSeasonal => 'N',
        }
    }
}

/// A season code such as `23S`: two-digit year offset from 2000 plus type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeasonCode {
    year: u8,
    kind: SeasonType,
}

impl SeasonCode {
    /// Parses a season code, rejecting anything but `DDT` with T in S/F/N.
    pub fn parse(raw: &str) -> Result<Self, SeasonError> {
        let trimmed = raw.trim();
        let invalid = || SeasonError::InvalidSeasonCode(raw.to_string());

        let mut chars = trimmed.chars();
        let (Some(d1), Some(d2), Some(suffix), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(invalid());
        };

        let (Some(tens), Some(ones)) = (d1.to_digit(10), d2.to_digit(10)) else {
            return Err(invalid());
        };
        let kind = SeasonType::from_suffix(suffix).ok_or_else(invalid)?;

        #[allow(clippy::cast_possible_truncation)]
        let year = (tens * 10 + ones) as u8;
        Ok(Self { year, kind })
    }

    /// Creates a code from parts. `year` must be below 100.
    pub fn new(year: u8, kind: SeasonType) -> Result<Self, SeasonError> {
        if year < 100 {
            Ok(Self { year, kind })
        } else {
            Err(SeasonError::InvalidSeasonCode(format!(
                "{year}{}",
                kind.suffix()
            )))
        }
    }

    /// Two-digit year.
    #[must_use]
    pub const fn short_year(self) -> u8 {
        self.year
    }

    /// Full calendar year (`2000 + YY`).
    #[must_use]
    pub fn full_year(self) -> i32 {
        2000 + i32::from(self.year)
    }

    /// Season type.
    #[must_use]
    pub const fn kind(self) -> SeasonType {
        self.kind
    }

    /// Same season type one year earlier, if the year does not underflow.
    #[must_use]
    pub fn prior_year(self) -> Option<Self> {
        self.year.checked_sub(1).map(|year| Self {
            year,
            kind: self.kind,
        })
    }
}

impl fmt::Display for SeasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}", self.year, self.kind.suffix())
    }
}

impl FromStr for SeasonCode {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SeasonCode {
    type Error = SeasonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeasonCode> for String {
    fn from(value: SeasonCode) -> Self {
        value.to_string()
    }
}

impl PartialOrd for SeasonCode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SeasonCode {
    /// Chronological by season start: within a year N, then S, then F.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        fn rank(kind: SeasonType) -> u8 {
            match kind {
                SeasonType::NonSeasonal => 0,
                SeasonType::SpringSummer => 1,
                SeasonType::FallWinter => 2,
            }
        }
        (self.year, rank(self.kind)).cmp(&(other.year, rank(other.kind)))
    }
}
