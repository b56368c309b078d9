//! Shared CLI helpers.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use console::{style, StyledObject};
use serde::Serialize;

use medexp::config::Config;
use medexp::status::{ExpiryStatus, StatusReport, StatusThresholds};
use medexp::Extraction;

use super::icons::{dim_arrow, error, success};

/// Load config from an explicit path, or auto-discover it.
pub async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(Config::load_from_path(path).await?)
        }
        None => Ok(Config::load().await),
    }
}

/// Extraction plus its status relative to today.
#[derive(Debug, Serialize)]
pub struct DateReport<'a> {
    #[serde(flatten)]
    pub extraction: &'a Extraction,
    #[serde(flatten)]
    pub status: StatusReport,
    pub expires_at: NaiveDateTime,
}

impl<'a> DateReport<'a> {
    pub fn new(extraction: &'a Extraction, thresholds: &StatusThresholds, today: NaiveDate) -> Self {
        Self {
            extraction,
            status: thresholds.classify(extraction.date, today),
            expires_at: extraction.date.end_of_day(),
        }
    }
}

/// Status label colored by urgency.
pub fn styled_status(status: ExpiryStatus) -> StyledObject<&'static str> {
    let label = style(status.as_str());
    match status {
        ExpiryStatus::Safe => label.green(),
        ExpiryStatus::Soon => label.yellow(),
        ExpiryStatus::Danger => label.red(),
        ExpiryStatus::Expired => label.red().bold(),
    }
}

/// Print a found date, or a not-found line.
pub fn print_report(report: Option<&DateReport<'_>>) {
    let Some(report) = report else {
        println!("{} No expiration date found", error());
        return;
    };
    let extraction = report.extraction;
    println!(
        "{} {} ({}, {} days)",
        success(),
        style(extraction.date).bold(),
        styled_status(report.status.status),
        report.status.days_remaining
    );
    println!(
        "  {} Matched {:?} in {:?}",
        dim_arrow(),
        extraction.matched,
        extraction.candidate
    );
    println!("  {} Strategy: {}", dim_arrow(), extraction.strategy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use medexp::extract_expiration_date;

    #[test]
    fn test_date_report_json_is_flat() {
        let extraction = extract_expiration_date(&["EXP 15/11/2025"]).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let report = DateReport::new(&extraction, &StatusThresholds::default(), today);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["date"], "2025-11-15");
        assert_eq!(json["strategy"], "keyword_numeric");
        assert_eq!(json["status"], "soon");
        assert_eq!(json["days_remaining"], 10);
        assert_eq!(json["expires_at"], "2025-11-15T23:59:59.999");
    }
}
