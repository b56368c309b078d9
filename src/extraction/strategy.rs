//! Declarative table of date-matching strategies.
//!
//! Each strategy is a regex plus a [`Layout`] saying which capture group is
//! the day, month or year. Strategies only locate and capture; calendar
//! validation happens in [`super::resolve`].
//!
//! The table is ordered by descending confidence:
//!
//! | Kind | Tier | Example |
//! |---|---|---|
//! | `KeywordNumeric` | keyword | `EXP: 15/11/2025`, `ED 11.27` |
//! | `KeywordCompact` | keyword | `EXP 151125` |
//! | `KeywordMonthName` | keyword | `EXP NOV 2027`, `BB 15 NOV 27` |
//! | `Numeric` | bare | `15-11-25`, `2027-11-15` |
//! | `Compact` | bare | `140625`, `15112027` |
//! | `MonthName` | bare | `15 NOV 2027`, `NOV152027`, `NOV 2027` |
//! | `MonthYear` | bare | `11/2027`, `11 2027`, `11/27`, `1127` |
//! | `MixedContent` | bare | `LOT12345601.12.2026` |

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::date::DateComponents;
use super::locale::LocaleTables;

/// Named strategy groups, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    KeywordNumeric,
    KeywordCompact,
    KeywordMonthName,
    Numeric,
    Compact,
    MonthName,
    MonthYear,
    MixedContent,
}

impl StrategyKind {
    /// Every kind, highest confidence first.
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::KeywordNumeric,
        StrategyKind::KeywordCompact,
        StrategyKind::KeywordMonthName,
        StrategyKind::Numeric,
        StrategyKind::Compact,
        StrategyKind::MonthName,
        StrategyKind::MonthYear,
        StrategyKind::MixedContent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::KeywordNumeric => "keyword_numeric",
            StrategyKind::KeywordCompact => "keyword_compact",
            StrategyKind::KeywordMonthName => "keyword_month_name",
            StrategyKind::Numeric => "numeric",
            StrategyKind::Compact => "compact",
            StrategyKind::MonthName => "month_name",
            StrategyKind::MonthYear => "month_year",
            StrategyKind::MixedContent => "mixed_content",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            StrategyKind::KeywordNumeric
            | StrategyKind::KeywordCompact
            | StrategyKind::KeywordMonthName => Tier::Keyword,
            _ => Tier::Bare,
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confidence tier. Keyword strategies run per candidate; bare strategies
/// only after every candidate has failed all keyword strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Keyword,
    Bare,
}

/// Which capture group holds which component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Groups: day (optional), month, year.
    DayMonthYear,
    /// Groups: month, day, year.
    MonthDayYear,
    /// Groups: month, year. Day defaults to 1.
    MonthYear,
    /// Groups: year, month, day.
    YearMonthDay,
    /// Group: one unseparated digit run.
    Compact,
}

/// What a strategy captured, before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Captured<'t> {
    Parts(DateComponents<'t>),
    Digits(&'t str),
}

/// One successful pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyMatch<'t> {
    pub kind: StrategyKind,
    pub variant: &'static str,
    /// Matched substring without surrounding boundary characters.
    pub matched: &'t str,
    pub captured: Captured<'t>,
}

/// A single pattern and its capture layout.
#[derive(Debug, Clone)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub variant: &'static str,
    pattern: Regex,
    layout: Layout,
    last_first: bool,
}

impl Strategy {
    fn new(
        kind: StrategyKind,
        variant: &'static str,
        pattern: &str,
        layout: Layout,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            variant,
            pattern: Regex::new(pattern)?,
            layout,
            last_first: false,
        })
    }

    /// Prefer the last match in the text instead of the first.
    fn last_first(mut self) -> Self {
        self.last_first = true;
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// All matches in preference order. Matches may overlap: scanning resumes
    /// one character after the start of each hit.
    pub fn matches<'t>(&self, text: &'t str) -> Vec<StrategyMatch<'t>> {
        let mut found = Vec::new();
        let mut start = 0;
        while start <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, start) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if let Some(hit) = self.interpret(&caps) {
                found.push(hit);
            }
            start = whole.start()
                + text[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        if self.last_first {
            found.reverse();
        }
        found
    }

    fn interpret<'t>(&self, caps: &Captures<'t>) -> Option<StrategyMatch<'t>> {
        let group = |i: usize| caps.get(i).map(|m| m.as_str());
        let captured = match self.layout {
            Layout::DayMonthYear => {
                Captured::Parts(DateComponents::new(group(1), group(2)?, group(3)?))
            }
            Layout::MonthDayYear => {
                Captured::Parts(DateComponents::new(Some(group(2)?), group(1)?, group(3)?))
            }
            Layout::MonthYear => Captured::Parts(DateComponents::new(None, group(1)?, group(2)?)),
            Layout::YearMonthDay => {
                Captured::Parts(DateComponents::new(Some(group(3)?), group(2)?, group(1)?))
            }
            Layout::Compact => Captured::Digits(group(1)?),
        };
        let matched = caps
            .get(0)?
            .as_str()
            .trim_matches(|c: char| !c.is_alphanumeric());
        Some(StrategyMatch {
            kind: self.kind,
            variant: self.variant,
            matched,
            captured,
        })
    }
}

/// Alternation of upper-case literals, longest first. Internal spaces match
/// any run of whitespace.
fn alternation(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| {
            name.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

// Numeric separators. Keyword-anchored dates also accept plain spaces.
const SEP: &str = r"[/.\-]";
const KEYWORD_SEP: &str = r"(?:\s*[/.\-]\s*|\s+)";
// Loose punctuation around month names.
const NAME_SEP: &str = r"[\s./\-,]*";
// Year of four or two digits, not followed by another digit.
const YEAR: &str = r"(\d{4}|\d{2})(?:[^0-9]|$)";
const YEAR4: &str = r"(\d{4})(?:[^0-9]|$)";
const NOT_DIGIT_BEFORE: &str = r"(?:^|[^0-9])";
// Excludes the tail of a longer date ("13/2025" inside "32/13/2025").
const NOT_DATE_BEFORE: &str = r"(?:^|[^0-9/.\-])";

/// Build the full ordered strategy table for the given locale tables.
pub fn build_strategies(tables: &LocaleTables) -> Result<Vec<Strategy>, regex::Error> {
    let anchors = alternation(&tables.anchor_names());
    let months = alternation(&tables.month_names());
    let has_anchors = !tables.anchors().is_empty();
    let has_months = !months.is_empty();

    // Keyword, optional "DATE", optional colon or period.
    let anchor = format!(r"\b(?:{anchors})(?:\s*\.?\s*DATE)?\s*[:.\-]?\s*");
    let month = format!(r"({months})\.?");

    let mut table = Vec::new();

    if has_anchors {
        table.push(Strategy::new(
            StrategyKind::KeywordNumeric,
            "dmy",
            &format!(r"{anchor}(?:(\d{{1,2}}){KEYWORD_SEP})?(\d{{1,2}}){KEYWORD_SEP}{YEAR}"),
            Layout::DayMonthYear,
        )?);
        table.push(Strategy::new(
            StrategyKind::KeywordCompact,
            "digits",
            &format!(r"{anchor}(\d{{8}}|\d{{6}}|\d{{4}})(?:[^0-9]|$)"),
            Layout::Compact,
        )?);
        if has_months {
            table.push(Strategy::new(
                StrategyKind::KeywordMonthName,
                "dmy",
                &format!(r"{anchor}(\d{{1,2}}){NAME_SEP}{month}{NAME_SEP}{YEAR}"),
                Layout::DayMonthYear,
            )?);
            table.push(Strategy::new(
                StrategyKind::KeywordMonthName,
                "mdy",
                &format!(r"{anchor}{month}{NAME_SEP}(\d{{1,2}}){NAME_SEP}{YEAR4}"),
                Layout::MonthDayYear,
            )?);
            // A 2-digit year needs a separator, or "NOV 2027" reads as NOV 20 '27.
            table.push(Strategy::new(
                StrategyKind::KeywordMonthName,
                "mdyy",
                &format!(r"{anchor}{month}{NAME_SEP}(\d{{1,2}})[\s./\-,]+(\d{{2}})(?:[^0-9]|$)"),
                Layout::MonthDayYear,
            )?);
            table.push(Strategy::new(
                StrategyKind::KeywordMonthName,
                "my",
                &format!(r"{anchor}{month}{NAME_SEP}{YEAR}"),
                Layout::MonthYear,
            )?);
        }
    }

    table.push(Strategy::new(
        StrategyKind::Numeric,
        "dmy",
        &format!(r"{NOT_DIGIT_BEFORE}(\d{{1,2}}){SEP}(\d{{1,2}}){SEP}{YEAR}"),
        Layout::DayMonthYear,
    )?);
    table.push(Strategy::new(
        StrategyKind::Numeric,
        "ymd",
        &format!(r"{NOT_DIGIT_BEFORE}(\d{{4}}){SEP}(\d{{1,2}}){SEP}(\d{{1,2}})(?:[^0-9]|$)"),
        Layout::YearMonthDay,
    )?);

    table.push(Strategy::new(
        StrategyKind::Compact,
        "digits",
        &format!(r"{NOT_DIGIT_BEFORE}(\d{{8}}|\d{{6}})(?:[^0-9]|$)"),
        Layout::Compact,
    )?);

    if has_months {
        table.push(Strategy::new(
            StrategyKind::MonthName,
            "dmy",
            &format!(r"{NOT_DIGIT_BEFORE}(\d{{1,2}}){NAME_SEP}{month}{NAME_SEP}{YEAR}"),
            Layout::DayMonthYear,
        )?);
        table.push(Strategy::new(
            StrategyKind::MonthName,
            "mdy",
            &format!(r"\b{month}{NAME_SEP}(\d{{1,2}}){NAME_SEP}{YEAR4}"),
            Layout::MonthDayYear,
        )?);
        table.push(Strategy::new(
            StrategyKind::MonthName,
            "my",
            &format!(r"\b{month}{NAME_SEP}{YEAR4}"),
            Layout::MonthYear,
        )?);
    }

    table.push(Strategy::new(
        StrategyKind::MonthYear,
        "mm/yyyy",
        &format!(r"{NOT_DATE_BEFORE}(\d{{1,2}})\s*{SEP}\s*{YEAR4}"),
        Layout::MonthYear,
    )?);
    table.push(Strategy::new(
        StrategyKind::MonthYear,
        "mm yyyy",
        &format!(r"{NOT_DATE_BEFORE}(\d{{1,2}})\s+{YEAR4}"),
        Layout::MonthYear,
    )?);
    table.push(Strategy::new(
        StrategyKind::MonthYear,
        "mm/yy",
        r"(?:^|[^0-9/.\-])(\d{1,2})/(\d{2})(?:[^0-9/.\-]|$)",
        Layout::MonthYear,
    )?);
    table.push(Strategy::new(
        StrategyKind::MonthYear,
        "mmyy",
        r"^(\d{2})(\d{2})$",
        Layout::MonthYear,
    )?);

    table.push(
        Strategy::new(
            StrategyKind::MixedContent,
            "last dd.mm.yyyy",
            r"(\d{2})[./\-](\d{2})[./\-](\d{4})",
            Layout::DayMonthYear,
        )?
        .last_first(),
    );

    Ok(table)
}
