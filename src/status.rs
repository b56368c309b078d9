//! Expiry status shown alongside an extracted date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extraction::ResolvedDate;

/// How close a product is to its expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Safe,
    Soon,
    Danger,
    Expired,
}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Safe => "safe",
            ExpiryStatus::Soon => "soon",
            ExpiryStatus::Danger => "danger",
            ExpiryStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day thresholds for the status bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// More than this many days left is safe.
    pub soon_days: i64,
    /// This many days left or fewer is danger.
    pub danger_days: i64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            soon_days: 14,
            danger_days: 4,
        }
    }
}

/// Status of a date relative to `today`, plus the days remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub status: ExpiryStatus,
    pub days_remaining: i64,
}

impl StatusThresholds {
    pub fn classify_days(&self, days_remaining: i64) -> ExpiryStatus {
        if days_remaining < 0 {
            ExpiryStatus::Expired
        } else if days_remaining <= self.danger_days {
            ExpiryStatus::Danger
        } else if days_remaining <= self.soon_days {
            ExpiryStatus::Soon
        } else {
            ExpiryStatus::Safe
        }
    }

    /// The product stays usable through the end of the stated day, so a date
    /// equal to `today` is danger, not expired.
    pub fn classify(&self, date: ResolvedDate, today: NaiveDate) -> StatusReport {
        let days_remaining = date.days_remaining(today);
        StatusReport {
            status: self.classify_days(days_remaining),
            days_remaining,
        }
    }
}
