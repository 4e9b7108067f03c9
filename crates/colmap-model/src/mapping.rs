//! Mapping suggestions and confidence grading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel field name for columns without a confident mapping.
pub const UNMAPPED: &str = "unmapped";

/// A suggested mapping from one source column to a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// Source column name, echoed from the input header.
    pub original_column: String,
    /// Canonical field name, or [`UNMAPPED`].
    pub suggested_field: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    /// Short explanation for the reviewer.
    pub reasoning: String,
}

impl MappingSuggestion {
    /// Creates an unmapped suggestion with zero confidence.
    pub fn unmapped(column: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            original_column: column.into(),
            suggested_field: UNMAPPED.to_string(),
            confidence: 0.0,
            reasoning: reasoning.into(),
        }
    }

    /// Returns true if the suggestion points at a catalog field.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.suggested_field != UNMAPPED
    }
}

/// Confidence level categories for reviewer triage.
///
/// - `High`: near-certain, usually accepted as is
/// - `Medium`: plausible, should be reviewed
/// - `Low`: weak, needs manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Boundaries between confidence levels.
///
/// Scores below `low` are not graded at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for high-quality matches (default: 0.90).
    pub high: f64,
    /// Minimum confidence for medium-quality matches (default: 0.70).
    pub medium: f64,
    /// Minimum confidence to be graded at all (default: 0.30).
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.90,
            medium: 0.70,
            low: 0.30,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score. Returns `None` below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f64) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// Aggregate view over one batch of suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingSummary {
    /// Number of suggestions in the batch.
    pub total: usize,
    /// Suggestions that point at a catalog field.
    pub mapped: usize,
    /// Suggestions left as [`UNMAPPED`].
    pub unmapped: usize,
    /// Mapped suggestions per confidence level.
    pub by_level: BTreeMap<ConfidenceLevel, usize>,
    /// Mean confidence over mapped suggestions.
    pub mean_confidence: Option<f64>,
}

impl MappingSummary {
    /// Summarizes suggestions using the default thresholds.
    #[must_use]
    pub fn from_suggestions(suggestions: &[MappingSuggestion]) -> Self {
        Self::from_suggestions_with(suggestions, &ConfidenceThresholds::default())
    }

    /// Summarizes suggestions using custom thresholds.
    #[must_use]
    pub fn from_suggestions_with(
        suggestions: &[MappingSuggestion],
        thresholds: &ConfidenceThresholds,
    ) -> Self {
        let mut summary = Self {
            total: suggestions.len(),
            ..Self::default()
        };
        let mut sum = 0.0;
        for suggestion in suggestions {
            if !suggestion.is_mapped() {
                summary.unmapped += 1;
                continue;
            }
            summary.mapped += 1;
            sum += suggestion.confidence;
            if let Some(level) = thresholds.categorize(suggestion.confidence) {
                *summary.by_level.entry(level).or_insert(0) += 1;
            }
        }
        if summary.mapped > 0 {
            summary.mean_confidence = Some(sum / summary.mapped as f64);
        }
        summary
    }

    /// Number of mapped suggestions at the given level.
    #[must_use]
    pub fn count(&self, level: ConfidenceLevel) -> usize {
        self.by_level.get(&level).copied().unwrap_or(0)
    }
}
