//! Candidate ordering: keyword-bearing fragments are tried first.

/// Stable partition of candidates: every candidate containing one of
/// `keywords` (case-insensitive substring) comes before every candidate that
/// contains none. Relative order inside each group is preserved.
///
/// Keywords are expected in upper case.
pub fn prioritize<'a, S: AsRef<str>>(candidates: &'a [S], keywords: &[String]) -> Vec<&'a str> {
    let (mut keyed, plain): (Vec<&str>, Vec<&str>) = candidates
        .iter()
        .map(AsRef::as_ref)
        .partition(|candidate| has_keyword(candidate, keywords));
    keyed.extend(plain);
    keyed
}

/// Whether the text contains any of the upper-case keywords.
pub fn has_keyword(text: &str, keywords: &[String]) -> bool {
    let upper = text.to_uppercase();
    keywords.iter().any(|keyword| upper.contains(keyword.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        ["EXP", "BEST", "USE BY", "BAIK DIGUNAKAN"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_keyword_candidates_move_first() {
        let input = ["05/12/2025", "EXP 15/11/2025"];
        assert_eq!(
            prioritize(&input, &keywords()),
            vec!["EXP 15/11/2025", "05/12/2025"]
        );
    }

    #[test]
    fn test_partition_is_stable() {
        let input = ["a", "exp 1", "b", "Best 2", "c", "use by 3"];
        assert_eq!(
            prioritize(&input, &keywords()),
            vec!["exp 1", "Best 2", "use by 3", "a", "b", "c"]
        );
    }

    #[test]
    fn test_no_keywords_keeps_order() {
        let input = vec!["3".to_string(), "1".to_string(), "2".to_string()];
        assert_eq!(prioritize(&input, &keywords()), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_indonesian_keyword() {
        let input = ["12345", "Baik digunakan sebelum 01 2027"];
        assert_eq!(prioritize(&input, &keywords())[0], input[1]);
    }

    #[test]
    fn test_empty_input() {
        let input: [&str; 0] = [];
        assert!(prioritize(&input, &keywords()).is_empty());
    }
}
