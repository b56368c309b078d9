//! medexp - expiration date extraction for medicine packaging.
//!
//! Core library: the date extraction engine plus the collaborators that feed
//! it (OCR backends) and consume it (status classification, frame
//! confirmation).

// Type lookups use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod confirm;
pub mod extraction;
pub mod ocr;
pub mod scan;
pub mod status;

pub use extraction::{
    extract_expiration_date, DateExtractor, Extraction, ResolvedDate, StrategyKind,
};
