//! Turning captured strings into a validated calendar date.

use super::date::{DateComponents, ResolvedDate};
use super::locale::LocaleTables;
use super::validate::{is_valid_date, YearBounds};

/// Two-digit years below this land in the 2000s, the rest in the 1900s.
///
/// The pivot is fixed and does not move with the current date, so a
/// two-digit "51" always means 1951.
pub const PIVOT_YEAR: i32 = 50;

/// Expand a two-digit year using the fixed pivot. Four-digit years pass through.
pub fn normalize_year(year: i32) -> i32 {
    match year {
        0..=99 if year < PIVOT_YEAR => 2000 + year,
        0..=99 => 1900 + year,
        _ => year,
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Resolves raw components against month tables and a year window.
#[derive(Debug, Clone)]
pub struct Resolver {
    tables: LocaleTables,
    bounds: YearBounds,
}

impl Resolver {
    pub fn new(tables: LocaleTables, bounds: YearBounds) -> Self {
        Self { tables, bounds }
    }

    pub fn tables(&self) -> &LocaleTables {
        &self.tables
    }

    pub fn bounds(&self) -> YearBounds {
        self.bounds
    }

    /// Month from a numeric string or a month name.
    pub fn month(&self, month: &str) -> Option<u32> {
        match parse_digits(month) {
            Some(n) => Some(n),
            None => self.tables.month_number(month),
        }
    }

    /// Resolve day (default 1), month and year strings into a date.
    ///
    /// Returns None for anything unparseable or invalid.
    pub fn resolve(&self, day: Option<&str>, month: &str, year: &str) -> Option<ResolvedDate> {
        let day = match day {
            Some(d) => parse_digits(d)?,
            None => 1,
        };
        let month = self.month(month)?;
        let year = normalize_year(parse_digits(year)? as i32);

        if !is_valid_date(day, month, year, self.bounds) {
            return None;
        }
        ResolvedDate::from_ymd(year, month, day)
    }

    pub fn resolve_components(&self, parts: DateComponents<'_>) -> Option<ResolvedDate> {
        self.resolve(parts.day, parts.month, parts.year)
    }

    /// Resolve an unseparated digit run.
    ///
    /// Eight digits read as `DDMMYYYY`, six as `DDMMYY`, four as `MMYY`.
    /// With `year_first_fallback`, an invalid `DDMMYY` reading of six digits
    /// is retried as `YYMMDD`. Eight digits are only ever `DDMMYYYY`.
    pub fn resolve_compact(&self, digits: &str, year_first_fallback: bool) -> Option<ResolvedDate> {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.len() {
            8 => self.resolve(Some(&digits[0..2]), &digits[2..4], &digits[4..8]),
            6 => self
                .resolve(Some(&digits[0..2]), &digits[2..4], &digits[4..6])
                .or_else(|| {
                    if year_first_fallback {
                        self.resolve(Some(&digits[4..6]), &digits[2..4], &digits[0..2])
                    } else {
                        None
                    }
                }),
            4 => self.resolve(None, &digits[0..2], &digits[2..4]),
            _ => None,
        }
    }
}
