//! Expiration date extraction from OCR text fragments.
//!
//! Given the text fragments recognized on one camera frame, find the one that
//! encodes an expiration date and resolve it to a calendar date.
//!
//! The pipeline is pure and stateless:
//! 1. Candidates containing expiration keywords move to the front.
//! 2. Keyword-anchored strategies run over each candidate in turn.
//! 3. Only when every candidate has failed those, the bare strategies run,
//!    each one over all candidates before the next strategy is tried.
//! 4. Every match is resolved and validated; failures fall through to the
//!    next match, strategy or candidate. Nothing in the cascade errors.

mod date;
pub mod locale;
mod prioritize;
mod resolve;
pub mod strategy;
mod validate;

use std::sync::LazyLock;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

pub use date::{DateComponents, ResolvedDate};
pub use locale::{LocalePack, LocaleTables};
pub use prioritize::{has_keyword, prioritize};
pub use resolve::{normalize_year, Resolver, PIVOT_YEAR};
pub use strategy::{Captured, StrategyKind, StrategyMatch, Tier};
pub use validate::{days_in_month, is_leap_year, is_valid_date, YearBounds, YearWindow};

use strategy::{build_strategies, Strategy};

/// Errors building an extractor from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Unknown locale pack: {0}")]
    UnknownLocale(String),

    #[error("Invalid year window: {0:?}")]
    InvalidYearWindow(YearWindow),

    #[error("Failed to compile date pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Accepted year range, applied to every strategy.
    pub year_window: YearWindow,
    /// Built-in locale packs to load ("en", "id").
    pub locales: Vec<String>,
    /// Additional locale packs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_locales: Vec<LocalePack>,
    /// Retry 6-digit runs as `YYMMDD` when `DDMMYY` is invalid.
    pub compact_fallback: bool,
    /// Retry `MM/DD` when a `DD/MM` reading is invalid.
    pub day_month_swap: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            year_window: YearWindow::default(),
            locales: vec!["en".to_string(), "id".to_string()],
            custom_locales: Vec::new(),
            compact_fallback: true,
            day_month_swap: true,
        }
    }
}

/// A successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub date: ResolvedDate,
    /// The candidate fragment the date came from, as supplied.
    pub candidate: String,
    /// The matched substring (upper-cased).
    pub matched: String,
    pub strategy: StrategyKind,
}

/// The date extraction engine.
///
/// Immutable once built, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    resolver: Resolver,
    strategies: Vec<Strategy>,
    compact_fallback: bool,
    day_month_swap: bool,
}

static DEFAULT_EXTRACTOR: LazyLock<DateExtractor> = LazyLock::new(|| {
    DateExtractor::new(&ExtractionConfig::default()).expect("built-in locale packs compile")
});

/// Extract an expiration date using the default English + Indonesian engine.
pub fn extract_expiration_date<S: AsRef<str>>(candidates: &[S]) -> Option<Extraction> {
    DEFAULT_EXTRACTOR.extract(candidates)
}

impl DateExtractor {
    /// Build an extractor; a forward year window is anchored on today's year.
    pub fn new(config: &ExtractionConfig) -> Result<Self, BuildError> {
        Self::with_current_year(config, Local::now().year())
    }

    /// Build an extractor with an explicit current year.
    pub fn with_current_year(
        config: &ExtractionConfig,
        current_year: i32,
    ) -> Result<Self, BuildError> {
        if !config.year_window.is_well_formed() {
            return Err(BuildError::InvalidYearWindow(config.year_window));
        }

        let mut packs = Vec::with_capacity(config.locales.len() + config.custom_locales.len());
        for name in &config.locales {
            let pack =
                LocalePack::builtin(name).ok_or_else(|| BuildError::UnknownLocale(name.clone()))?;
            packs.push(pack);
        }
        packs.extend(config.custom_locales.iter().cloned());

        let tables = LocaleTables::from_packs(&packs);
        let strategies = build_strategies(&tables)?;
        let bounds = config.year_window.bounds(current_year);

        debug!(
            locales = ?packs.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            strategies = strategies.len(),
            min_year = bounds.min,
            max_year = bounds.max,
            "Built date extractor"
        );

        Ok(Self {
            resolver: Resolver::new(tables, bounds),
            strategies,
            compact_fallback: config.compact_fallback,
            day_month_swap: config.day_month_swap,
        })
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Find the most likely expiration date among the candidates.
    ///
    /// Returns None for empty input or when nothing validates.
    pub fn extract<S: AsRef<str>>(&self, candidates: &[S]) -> Option<Extraction> {
        if candidates.is_empty() {
            trace!("No candidates supplied");
            return None;
        }

        let ordered = prioritize(candidates, self.resolver.tables().priority_keywords());
        trace!(?ordered, "Prioritized candidates");
        let prepared: Vec<(&str, String)> = ordered
            .iter()
            .map(|candidate| (*candidate, normalize(candidate)))
            .collect();

        let keyword_kinds = kinds_in(Tier::Keyword);
        for (candidate, text) in &prepared {
            for &kind in &keyword_kinds {
                if let Some(found) = self.try_kind(kind, candidate, text) {
                    return Some(found);
                }
            }
        }

        for kind in kinds_in(Tier::Bare) {
            for (candidate, text) in &prepared {
                if let Some(found) = self.try_kind(kind, candidate, text) {
                    return Some(found);
                }
            }
        }

        debug!(candidates = candidates.len(), "No expiration date found");
        None
    }

    /// Run every strategy, in cascade order, over a single candidate.
    pub fn try_parse(&self, candidate: &str) -> Option<Extraction> {
        let text = normalize(candidate);
        StrategyKind::ALL
            .iter()
            .find_map(|&kind| self.try_kind(kind, candidate, &text))
    }

    fn try_kind(&self, kind: StrategyKind, candidate: &str, text: &str) -> Option<Extraction> {
        if text.is_empty() {
            return None;
        }
        for strategy in self.strategies.iter().filter(|s| s.kind == kind) {
            for hit in strategy.matches(text) {
                match self.interpret(&hit) {
                    Some(date) => {
                        debug!(
                            strategy = %kind,
                            variant = hit.variant,
                            matched = hit.matched,
                            %date,
                            "Matched expiration date"
                        );
                        return Some(Extraction {
                            date,
                            candidate: candidate.to_string(),
                            matched: hit.matched.to_string(),
                            strategy: kind,
                        });
                    }
                    None => {
                        debug!(
                            strategy = %kind,
                            variant = hit.variant,
                            matched = hit.matched,
                            "Rejected invalid date components"
                        );
                    }
                }
            }
        }
        None
    }

    /// Resolve a match, trying secondary readings when the primary is invalid.
    fn interpret(&self, hit: &StrategyMatch<'_>) -> Option<ResolvedDate> {
        match hit.captured {
            Captured::Digits(digits) => self.resolver.resolve_compact(digits, self.compact_fallback),
            Captured::Parts(parts) => self.resolver.resolve_components(parts).or_else(|| {
                if self.day_month_swap {
                    self.resolver.resolve_components(parts.swapped()?)
                } else {
                    None
                }
            }),
        }
    }
}

fn normalize(candidate: &str) -> String {
    candidate.trim().to_uppercase()
}

fn kinds_in(tier: Tier) -> Vec<StrategyKind> {
    StrategyKind::ALL
        .into_iter()
        .filter(|kind| kind.tier() == tier)
        .collect()
}
