//! Locale packs: expiration keywords and month names per language.
//!
//! The cascade never hard-codes a language. Every keyword and month name it
//! knows comes from the packs merged into [`LocaleTables`], so a new language
//! is a new pack (built in, or supplied through configuration).

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Keyword and month-name tables for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalePack {
    /// Short identifier, e.g. "en" or "id".
    pub name: String,
    /// Substrings that move a candidate to the front of the queue.
    #[serde(default)]
    pub priority_keywords: Vec<String>,
    /// Keywords that anchor a date immediately after them.
    #[serde(default)]
    pub anchors: Vec<String>,
    /// Month names and abbreviations mapped to month numbers (1-12).
    #[serde(default)]
    pub months: BTreeMap<String, u32>,
}

const ENGLISH_MONTHS: [(&str, u32); 24] = [
    ("JAN", 1),
    ("JANUARY", 1),
    ("FEB", 2),
    ("FEBRUARY", 2),
    ("MAR", 3),
    ("MARCH", 3),
    ("APR", 4),
    ("APRIL", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUNE", 6),
    ("JUL", 7),
    ("JULY", 7),
    ("AUG", 8),
    ("AUGUST", 8),
    ("SEP", 9),
    ("SEPT", 9),
    ("SEPTEMBER", 9),
    ("OCT", 10),
    ("OCTOBER", 10),
    ("NOV", 11),
    ("NOVEMBER", 11),
    ("DEC", 12),
    ("DECEMBER", 12),
];

const INDONESIAN_MONTHS: [(&str, u32); 27] = [
    ("JAN", 1),
    ("JANUARI", 1),
    ("FEB", 2),
    ("FEBRUARI", 2),
    ("MAR", 3),
    ("MARET", 3),
    ("APR", 4),
    ("APRIL", 4),
    ("MEI", 5),
    ("JUN", 6),
    ("JUNI", 6),
    ("JUL", 7),
    ("JULI", 7),
    ("AGU", 8),
    ("AGS", 8),
    ("AGT", 8),
    ("AGUSTUS", 8),
    ("SEP", 9),
    ("SEPTEMBER", 9),
    ("OKT", 10),
    ("OKTOBER", 10),
    ("NOV", 11),
    ("NOVEMBER", 11),
    ("DES", 12),
    ("DESEMBER", 12),
    ("NOP", 11),
    ("NOPEMBER", 11),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn month_map(items: &[(&str, u32)]) -> BTreeMap<String, u32> {
    items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl LocalePack {
    /// English keywords (EXP, BEST BEFORE, USE BY, ...) and month names.
    pub fn english() -> Self {
        Self {
            name: "en".to_string(),
            priority_keywords: strings(&[
                "EXP", "EXPIRE", "BEST", "USE BY", "BB", "BBD", "ED", "E:", "B:",
            ]),
            anchors: strings(&[
                "EXPIRATION",
                "EXPIRES",
                "EXPIRY",
                "EXPIRE",
                "EXP",
                "BEST BEFORE END",
                "BEST BEFORE",
                "USE BEFORE",
                "USE BY",
                "BBD",
                "BB",
                "ED",
            ]),
            months: month_map(&ENGLISH_MONTHS),
        }
    }

    /// Indonesian keywords (BAIK DIGUNAKAN SEBELUM, KEDALUWARSA, ...) and month names.
    pub fn indonesian() -> Self {
        Self {
            name: "id".to_string(),
            priority_keywords: strings(&[
                "KODE PRODUKSI",
                "BAIK DIGUNAKAN",
                "KEDALUWARSA",
                "KADALUWARSA",
                "KADALUARSA",
            ]),
            anchors: strings(&[
                "BAIK DIGUNAKAN SEBELUM",
                "KODE PRODUKSI",
                "KEDALUWARSA",
                "KADALUWARSA",
                "KADALUARSA",
            ]),
            months: month_map(&INDONESIAN_MONTHS),
        }
    }

    /// Look up a built-in pack by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "en" | "english" => Some(Self::english()),
            "id" | "indonesian" => Some(Self::indonesian()),
            _ => None,
        }
    }
}

/// Union of several locale packs, normalized to upper case.
#[derive(Debug, Clone, Default)]
pub struct LocaleTables {
    priority_keywords: Vec<String>,
    anchors: Vec<String>,
    months: HashMap<String, u32>,
}

impl LocaleTables {
    pub fn from_packs<'a>(packs: impl IntoIterator<Item = &'a LocalePack>) -> Self {
        let mut tables = Self::default();
        for pack in packs {
            for keyword in &pack.priority_keywords {
                push_unique(&mut tables.priority_keywords, keyword);
            }
            for anchor in &pack.anchors {
                push_unique(&mut tables.anchors, anchor);
            }
            for (name, &month) in &pack.months {
                let name = name.trim();
                if !name.is_empty() && (1..=12).contains(&month) {
                    tables.months.entry(name.to_uppercase()).or_insert(month);
                }
            }
        }
        tables
    }

    pub fn priority_keywords(&self) -> &[String] {
        &self.priority_keywords
    }

    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    /// Month number for a name or abbreviation, case-insensitive.
    pub fn month_number(&self, name: &str) -> Option<u32> {
        let key = name.trim().trim_end_matches('.').to_uppercase();
        self.months.get(&key).copied()
    }

    /// All month names, longest first, for building alternations.
    pub fn month_names(&self) -> Vec<&str> {
        longest_first(self.months.keys().map(String::as_str))
    }

    /// All anchors, longest first, for building alternations.
    pub fn anchor_names(&self) -> Vec<&str> {
        longest_first(self.anchors.iter().map(String::as_str))
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim().to_uppercase();
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

// Regex alternation is leftmost-first, so longer names must come before
// their prefixes (NOVEMBER before NOV, BBD before BB).
fn longest_first<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> LocaleTables {
        LocaleTables::from_packs(&[LocalePack::english(), LocalePack::indonesian()])
    }

    #[test]
    fn test_month_lookup_case_insensitive() {
        let tables = both();
        assert_eq!(tables.month_number("nov"), Some(11));
        assert_eq!(tables.month_number("November"), Some(11));
        assert_eq!(tables.month_number("DES"), Some(12));
        assert_eq!(tables.month_number("Agustus"), Some(8));
        assert_eq!(tables.month_number("SEPT."), Some(9));
        assert_eq!(tables.month_number("FOO"), None);
    }

    #[test]
    fn test_english_only_lacks_indonesian_months() {
        let tables = LocaleTables::from_packs(&[LocalePack::english()]);
        assert_eq!(tables.month_number("MEI"), None);
        assert_eq!(tables.month_number("MAY"), Some(5));
    }

    #[test]
    fn test_names_sorted_longest_first() {
        let tables = both();
        let months = tables.month_names();
        let nov = months.iter().position(|m| *m == "NOV").unwrap();
        let november = months.iter().position(|m| *m == "NOVEMBER").unwrap();
        assert!(november < nov);

        let anchors = tables.anchor_names();
        let bb = anchors.iter().position(|a| *a == "BB").unwrap();
        let bbd = anchors.iter().position(|a| *a == "BBD").unwrap();
        assert!(bbd < bb);
    }

    #[test]
    fn test_merge_deduplicates_keywords() {
        let tables = LocaleTables::from_packs(&[LocalePack::english(), LocalePack::english()]);
        assert_eq!(
            tables.priority_keywords().len(),
            LocalePack::english().priority_keywords.len()
        );
    }

    #[test]
    fn test_custom_pack_ignores_bad_month_numbers() {
        let mut pack = LocalePack {
            name: "ms".to_string(),
            priority_keywords: vec!["tarikh luput".to_string()],
            anchors: vec!["TARIKH LUPUT".to_string()],
            months: BTreeMap::new(),
        };
        pack.months.insert("ogos".to_string(), 8);
        pack.months.insert("BAD".to_string(), 13);

        let tables = LocaleTables::from_packs(&[pack]);
        assert_eq!(tables.month_number("OGOS"), Some(8));
        assert_eq!(tables.month_number("BAD"), None);
        assert_eq!(tables.priority_keywords(), &["TARIKH LUPUT".to_string()]);
    }

    #[test]
    fn test_custom_pack_ignores_blank_month_names() {
        let mut pack = LocalePack {
            name: "ms".to_string(),
            priority_keywords: Vec::new(),
            anchors: Vec::new(),
            months: BTreeMap::new(),
        };
        pack.months.insert(" ".to_string(), 3);
        pack.months.insert(String::new(), 4);
        pack.months.insert("ogos".to_string(), 8);

        let tables = LocaleTables::from_packs(&[pack]);
        assert_eq!(tables.month_names(), vec!["OGOS"]);
        assert_eq!(tables.month_number(""), None);
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(LocalePack::builtin("EN").unwrap().name, "en");
        assert_eq!(LocalePack::builtin("indonesian").unwrap().name, "id");
        assert!(LocalePack::builtin("fr").is_none());
    }
}
