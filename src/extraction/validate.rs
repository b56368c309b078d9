//! Calendar validation for resolved date components.

use serde::{Deserialize, Serialize};

/// Accepted range of years for a resolved expiration date.
///
/// One window applies to every strategy in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum YearWindow {
    /// Fixed inclusive range, independent of today's date.
    Absolute { min: i32, max: i32 },
    /// From the current year up to `years_ahead` years later.
    Forward { years_ahead: i32 },
}

impl Default for YearWindow {
    fn default() -> Self {
        YearWindow::Absolute {
            min: 1900,
            max: 2050,
        }
    }
}

impl YearWindow {
    /// Concrete inclusive bounds given the current year.
    pub fn bounds(&self, current_year: i32) -> YearBounds {
        match *self {
            YearWindow::Absolute { min, max } => YearBounds { min, max },
            YearWindow::Forward { years_ahead } => YearBounds {
                min: current_year,
                max: current_year + years_ahead,
            },
        }
    }

    pub fn is_well_formed(&self) -> bool {
        match *self {
            YearWindow::Absolute { min, max } => min <= max,
            YearWindow::Forward { years_ahead } => years_ahead >= 0,
        }
    }
}

/// Inclusive year range resolved from a [`YearWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, or 0 for a month outside 1..=12.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Check that day, month and year form a real date inside the year window.
pub fn is_valid_date(day: u32, month: u32, year: i32, bounds: YearBounds) -> bool {
    (1..=12).contains(&month)
        && day >= 1
        && day <= days_in_month(month, year)
        && bounds.contains(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: YearBounds = YearBounds {
        min: 1900,
        max: 2050,
    };

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2028));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1, 2025), 31);
        assert_eq!(days_in_month(4, 2025), 30);
        assert_eq!(days_in_month(2, 2025), 28);
        assert_eq!(days_in_month(2, 2028), 29);
        assert_eq!(days_in_month(13, 2025), 0);
        assert_eq!(days_in_month(0, 2025), 0);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date(29, 2, 2028, WIDE));
        assert!(!is_valid_date(29, 2, 2025, WIDE));
        assert!(!is_valid_date(32, 1, 2025, WIDE));
        assert!(!is_valid_date(0, 1, 2025, WIDE));
        assert!(!is_valid_date(15, 13, 2025, WIDE));
        assert!(!is_valid_date(15, 0, 2025, WIDE));
        assert!(!is_valid_date(1, 1, 2051, WIDE));
        assert!(!is_valid_date(1, 1, 1899, WIDE));
    }

    #[test]
    fn test_forward_window_bounds() {
        let window = YearWindow::Forward { years_ahead: 20 };
        let bounds = window.bounds(2026);
        assert!(bounds.contains(2026));
        assert!(bounds.contains(2046));
        assert!(!bounds.contains(2025));
        assert!(!bounds.contains(2047));
    }

    #[test]
    fn test_window_well_formed() {
        assert!(YearWindow::default().is_well_formed());
        assert!(!YearWindow::Absolute { min: 2050, max: 1900 }.is_well_formed());
        assert!(!YearWindow::Forward { years_ahead: -1 }.is_well_formed());
    }

    #[test]
    fn test_window_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            year_window: YearWindow,
        }
        let parsed: Wrapper =
            toml::from_str("[year_window]\npolicy = \"forward\"\nyears_ahead = 10\n").unwrap();
        assert_eq!(parsed.year_window, YearWindow::Forward { years_ahead: 10 });
    }
}
