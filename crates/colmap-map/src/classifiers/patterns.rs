//! Shape-based detectors that do not depend on the catalog's matching data.

use std::sync::LazyLock;

use colmap_catalog::FieldCatalog;
use regex::Regex;

use super::HeaderClassifier;
use crate::candidate::Candidate;

pub const WEEK_FIELD: &str = "last_activity";
pub const WEEK_CONFIDENCE: f64 = 0.85;
pub const WEEK_REASONING: &str = "week numbers mapped to last_activity for time-based analysis";

pub const IDENTIFIER_CONFIDENCE: f64 = 0.3;
pub const IDENTIFIER_REASONING: &str = "numeric ID field, typically not mapped";

/// `YYYYWW` or `YYYYWnn`.
static WEEK_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"^[0-9]{6}$").expect("Invalid YYYYWW regex"),
        Regex::new(r"^[0-9]{4}W[0-9]{2}$").expect("Invalid YYYYWnn regex"),
    ]
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid digits regex"));

/// Week-number and numeric-identifier detectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetectors;

impl HeaderClassifier for PatternDetectors {
    fn name(&self) -> &'static str {
        "pattern_detectors"
    }

    fn classify(&self, header: &str, values: &[String], catalog: &FieldCatalog) -> Vec<Candidate> {
        detect_week(header, values, catalog)
            .into_iter()
            .chain(detect_identifier(header, values))
            .collect()
    }
}

/// Header mentions "week" and at least one value is a `YYYYWW` week number.
pub fn detect_week(header: &str, values: &[String], catalog: &FieldCatalog) -> Option<Candidate> {
    if !header.contains("week") {
        return None;
    }
    let hit = values
        .iter()
        .any(|value| WEEK_PATTERNS.iter().any(|re| re.is_match(value.trim())));
    if !hit {
        return None;
    }
    Candidate::for_field(catalog, WEEK_FIELD, WEEK_CONFIDENCE, WEEK_REASONING)
}

/// Header is `id` or `*_id` and every non-empty value is all digits.
pub fn detect_identifier(header: &str, values: &[String]) -> Option<Candidate> {
    if header != "id" && !header.ends_with("_id") {
        return None;
    }
    let mut non_empty = values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .peekable();
    non_empty.peek()?;
    non_empty
        .all(|value| DIGITS.is_match(value))
        .then(|| Candidate::sentinel(IDENTIFIER_CONFIDENCE, IDENTIFIER_REASONING))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn week_numbers_detected() {
        let catalog = FieldCatalog::builtin();
        let candidate = detect_week("week", &values(&["202501", "202502"]), &catalog).unwrap();
        assert_eq!(candidate.field, WEEK_FIELD);
        assert_eq!(candidate.reasoning, WEEK_REASONING);

        assert!(detect_week("order_week", &values(&["2025W07"]), &catalog).is_some());
    }

    #[test]
    fn week_requires_header_and_values() {
        let catalog = FieldCatalog::builtin();
        assert!(detect_week("period", &values(&["202501"]), &catalog).is_none());
        assert!(detect_week("week", &values(&["first", "second"]), &catalog).is_none());
        assert!(detect_week("week", &[], &catalog).is_none());
    }

    #[test]
    fn numeric_ids_detected() {
        let candidate = detect_identifier("row_id", &values(&["1", "2", "3"])).unwrap();
        assert!(candidate.is_sentinel());
        assert!((candidate.confidence - IDENTIFIER_CONFIDENCE).abs() < 1e-9);
        assert!(detect_identifier("id", &values(&["42"])).is_some());
    }

    #[test]
    fn non_numeric_or_empty_ids_ignored() {
        assert!(detect_identifier("row_id", &values(&["1", "A2"])).is_none());
        assert!(detect_identifier("row_id", &[]).is_none());
        assert!(detect_identifier("paid", &values(&["1"])).is_none());
        assert!(detect_identifier("identity", &values(&["1"])).is_none());
    }

    #[test]
    fn non_ascii_digits_are_not_numbers() {
        let catalog = FieldCatalog::builtin();
        assert!(detect_identifier("row_id", &values(&["١٢٣"])).is_none());
        assert!(detect_identifier("row_id", &values(&["１２３"])).is_none());
        assert!(detect_week("week", &values(&["２０２５０１"]), &catalog).is_none());
        assert!(detect_week("week", &values(&["٢٠٢٥W٠١"]), &catalog).is_none());
    }
}
