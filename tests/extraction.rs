//! End-to-end extraction behavior through the public entry points.

use medexp::extraction::{ExtractionConfig, YearWindow};
use medexp::{extract_expiration_date, DateExtractor, ResolvedDate, StrategyKind};

fn date(year: i32, month: u32, day: u32) -> ResolvedDate {
    ResolvedDate::from_ymd(year, month, day).unwrap()
}

fn extract_date(candidates: &[&str]) -> Option<ResolvedDate> {
    extract_expiration_date(candidates).map(|e| e.date)
}

#[test]
fn test_same_input_same_result() {
    let candidates = ["PARACETAMOL", "LOT 2231A", "EXP 11/2027", "05/12/2025"];
    let first = extract_expiration_date(&candidates);
    let second = extract_expiration_date(&candidates);
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[test]
fn test_keyword_candidate_wins() {
    let found = extract_expiration_date(&["05/12/2025", "EXP 15/11/2025"]).unwrap();
    assert_eq!(found.date, date(2025, 11, 15));
    assert_eq!(found.candidate, "EXP 15/11/2025");
    assert_eq!(found.strategy, StrategyKind::KeywordNumeric);
}

#[test]
fn test_two_digit_year_pivot() {
    assert_eq!(extract_date(&["15-11-25"]), Some(date(2025, 11, 15)));
    assert_eq!(extract_date(&["15-11-72"]), Some(date(1972, 11, 15)));
}

#[test]
fn test_month_name_without_day() {
    let found = extract_expiration_date(&["EXP NOV 2027"]).unwrap();
    assert_eq!(found.date, date(2027, 11, 1));
    assert_eq!(found.strategy, StrategyKind::KeywordMonthName);
}

#[test]
fn test_compact_runs() {
    let found = extract_expiration_date(&["1127"]).unwrap();
    assert_eq!(found.date, date(2027, 11, 1));
    assert_eq!(found.strategy, StrategyKind::MonthYear);

    let found = extract_expiration_date(&["140625"]).unwrap();
    assert_eq!(found.date, date(2025, 6, 14));
    assert_eq!(found.strategy, StrategyKind::Compact);
}

#[test]
fn test_invalid_date_rejected() {
    assert_eq!(extract_date(&["32/13/2025"]), None);
}

#[test]
fn test_empty_and_garbage_input() {
    let empty: [&str; 0] = [];
    assert_eq!(extract_date(&empty), None);
    assert_eq!(extract_date(&["asdkjasd", "###", ""]), None);
}

#[test]
fn test_leap_year_boundary() {
    assert_eq!(extract_date(&["29/02/2028"]), Some(date(2028, 2, 29)));
    assert_eq!(extract_date(&["29/02/2025"]), None);
}

#[test]
fn test_indonesian_packaging() {
    assert_eq!(
        extract_date(&["BAIK DIGUNAKAN SEBELUM 12 AGU 2027"]),
        Some(date(2027, 8, 12))
    );
    assert_eq!(
        extract_date(&["No. Reg DKL1234567890A1", "KADALUWARSA: 01.03.28"]),
        Some(date(2028, 3, 1))
    );
}

#[test]
fn test_noisy_frame() {
    let frame = [
        "AMOXICILLIN",
        "500 mg",
        "BATCH 7781203",
        "MFG 03/2024",
        "Exp. Date: 02/2027",
    ];
    let found = extract_expiration_date(&frame).unwrap();
    assert_eq!(found.date, date(2027, 2, 1));
    assert_eq!(found.candidate, "Exp. Date: 02/2027");
}

#[test]
fn test_forward_window_rejects_past_years() {
    let config = ExtractionConfig {
        year_window: YearWindow::Forward { years_ahead: 20 },
        ..Default::default()
    };
    let extractor = DateExtractor::with_current_year(&config, 2025).unwrap();
    assert_eq!(extractor.extract(&["15-11-72"]), None);
    assert_eq!(
        extractor.extract(&["15-11-25"]).map(|e| e.date),
        Some(date(2025, 11, 15))
    );
    assert_eq!(extractor.extract(&["15-11-2046"]), None);
}

#[test]
fn test_concurrent_callers_agree() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| extract_date(&["EXP 15/11/2025"])))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(date(2025, 11, 15)));
    }
}

#[test]
fn test_date_after_batch_code_found_last() {
    let found = extract_expiration_date(&["LOT12345601.12.2026"]).unwrap();
    assert_eq!(found.date, date(2026, 12, 1));
    assert_eq!(found.strategy, StrategyKind::MixedContent);
    assert_eq!(found.matched, "01.12.2026");
}

#[test]
fn test_keyword_compact_runs() {
    let found = extract_expiration_date(&["EXP 151127"]).unwrap();
    assert_eq!(found.date, date(2027, 11, 15));
    assert_eq!(found.strategy, StrategyKind::KeywordCompact);

    let found = extract_expiration_date(&["MFG 010125", "ED 1127"]).unwrap();
    assert_eq!(found.date, date(2027, 11, 1));
    assert_eq!(found.strategy, StrategyKind::KeywordCompact);
}

#[test]
fn test_keyword_month_day_two_digit_year() {
    let found = extract_expiration_date(&["EXP NOV 15 27"]).unwrap();
    assert_eq!(found.date, date(2027, 11, 15));
    assert_eq!(found.strategy, StrategyKind::KeywordMonthName);
}
