//! Classifier output shared by every mapping stage.

use colmap_catalog::FieldCatalog;
use colmap_model::{MappingSuggestion, UNMAPPED};

/// Rank given to sentinel candidates so catalog fields win ties.
pub(crate) const SENTINEL_RANK: usize = usize::MAX;

/// A (field, confidence, reasoning) proposal for one header.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Canonical field name, or [`UNMAPPED`] for sentinel candidates.
    pub field: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Human-readable justification.
    pub reasoning: String,
    /// Catalog declaration index, used for tie-breaks.
    pub rank: usize,
}

impl Candidate {
    /// Creates a candidate for a catalog field, resolving its rank.
    ///
    /// Returns `None` if the catalog does not define `field`.
    pub fn for_field(
        catalog: &FieldCatalog,
        field: &str,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Option<Self> {
        let rank = catalog.index_of(field)?;
        Some(Self {
            field: field.to_string(),
            confidence,
            reasoning: reasoning.into(),
            rank,
        })
    }

    /// Creates an [`UNMAPPED`] sentinel candidate.
    pub fn sentinel(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            field: UNMAPPED.to_string(),
            confidence,
            reasoning: reasoning.into(),
            rank: SENTINEL_RANK,
        }
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.field == UNMAPPED
    }

    /// Turns the candidate into the suggestion emitted for `column`.
    pub fn into_suggestion(self, column: &str) -> MappingSuggestion {
        MappingSuggestion {
            original_column: column.to_string(),
            suggested_field: self.field,
            confidence: clamp_confidence(self.confidence),
            reasoning: self.reasoning,
        }
    }
}

/// Clamps a score into [0, 1], mapping NaN to 0.
pub(crate) fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_field_resolves_rank() {
        let catalog = FieldCatalog::builtin();
        let candidate = Candidate::for_field(&catalog, "company", 0.7, "test").unwrap();
        assert_eq!(candidate.rank, 2);
        assert!(Candidate::for_field(&catalog, "nope", 0.7, "test").is_none());
    }

    #[test]
    fn suggestion_confidence_is_clamped() {
        let suggestion = Candidate::sentinel(1.7, "x").into_suggestion("col");
        assert_eq!(suggestion.confidence, 1.0);
        let suggestion = Candidate::sentinel(f64::NAN, "x").into_suggestion("col");
        assert_eq!(suggestion.confidence, 0.0);
    }
}
