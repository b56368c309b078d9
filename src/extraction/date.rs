//! Date types produced by the extraction cascade.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Raw date components captured by a strategy match.
///
/// Nothing here is validated yet; month may be numeric or a month name and
/// year may be two or four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComponents<'a> {
    pub day: Option<&'a str>,
    pub month: &'a str,
    pub year: &'a str,
}

impl<'a> DateComponents<'a> {
    pub fn new(day: Option<&'a str>, month: &'a str, year: &'a str) -> Self {
        Self { day, month, year }
    }

    /// Same components with day and month exchanged (`MM/DD` reading).
    ///
    /// Returns None when there is no day to swap.
    pub fn swapped(&self) -> Option<Self> {
        Some(Self {
            day: Some(self.month),
            month: self.day?,
            year: self.year,
        })
    }
}

/// A validated calendar date read from packaging.
///
/// Expiration is inclusive: the product is good through the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedDate(NaiveDate);

impl ResolvedDate {
    /// Build from parts, returning None for dates that do not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Last representable instant of the stated day.
    pub fn end_of_day(&self) -> NaiveDateTime {
        let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.0.and_time(end)
    }

    /// Whole days from `today` until this date. Zero on the day itself,
    /// negative once the date has passed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.0 - today).num_days()
    }
}

impl From<NaiveDate> for ResolvedDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
