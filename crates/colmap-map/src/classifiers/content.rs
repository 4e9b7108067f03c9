//! Content validators: confirm a field against the column's sample values.

use std::sync::LazyLock;

use colmap_model::ContentHint;
use regex::Regex;

/// Ceiling for any content-adjusted confidence.
pub const CONTENT_CEILING: f64 = 0.95;
/// Boost applied when every sample value is numeric.
pub const NUMBER_BOOST: f64 = 0.20;
/// Boost applied when a sample value looks like a date.
pub const DATE_BOOST: f64 = 0.15;

/// `YYYY-MM-DD` (optionally followed by a time), `DD/MM/YYYY`, `YYYYMMDD`.
static DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("Invalid ISO date regex"),
        Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("Invalid DD/MM/YYYY regex"),
        Regex::new(r"^[0-9]{8}$").expect("Invalid YYYYMMDD regex"),
    ]
});

/// Result of a validator that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBoost {
    pub confidence: f64,
    pub reason: String,
}

/// Applies the validator for `hint` to `values`.
///
/// Returns the adjusted confidence when the values support the hint, or
/// `None` when the validator does not fire. `Text` never fires.
pub fn validate(hint: ContentHint, values: &[String], current: f64) -> Option<ContentBoost> {
    let total = values.len();
    if total == 0 {
        return None;
    }
    match hint {
        ContentHint::Email => {
            let hits = values.iter().filter(|v| v.contains('@')).count();
            (hits > 0).then(|| ContentBoost {
                confidence: current.max(CONTENT_CEILING),
                reason: format!("{hits}/{total} sample values contain '@'"),
            })
        }
        ContentHint::Number => {
            let non_empty: Vec<&str> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect();
            (!non_empty.is_empty() && non_empty.iter().all(|v| parse_number(v).is_some())).then(
                || ContentBoost {
                    confidence: CONTENT_CEILING.min(current + NUMBER_BOOST),
                    reason: format!("all {} sample values are numeric", non_empty.len()),
                },
            )
        }
        ContentHint::Date => {
            let hits = values.iter().filter(|v| looks_like_date(v)).count();
            (hits > 0).then(|| ContentBoost {
                confidence: CONTENT_CEILING.min(current + DATE_BOOST),
                reason: format!("{hits}/{total} sample values look like dates"),
            })
        }
        ContentHint::Text => None,
    }
}

/// Parses a finite number, tolerating thousands separators and a leading
/// currency sign.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed
        .strip_prefix(['$', '€', '£'])
        .unwrap_or(trimmed)
        .replace(',', "");
    unsigned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Returns true if the value has one of the recognized date shapes.
pub fn looks_like_date(raw: &str) -> bool {
    let trimmed = raw.trim();
    DATE_PATTERNS.iter().any(|re| re.is_match(trimmed))
}
