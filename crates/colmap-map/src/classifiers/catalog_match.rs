//! Catalog example/keyword matching with content validation.

use colmap_catalog::FieldCatalog;
use colmap_model::FieldDefinition;

use super::HeaderClassifier;
use super::content;
use crate::candidate::Candidate;

/// Confidence for a header equal to, containing or contained by an example.
pub const EXAMPLE_MATCH: f64 = 0.95;
/// Confidence for a header containing a keyword.
pub const KEYWORD_MATCH: f64 = 0.70;
/// Content-boosted fields must exceed this to be kept.
pub const CONTENT_RETENTION: f64 = 0.5;

/// Scores the header against every non-vetoed catalog field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogMatcher;

impl CatalogMatcher {
    /// Scores a single field. Returns `None` when the field is vetoed or
    /// ends up without a usable score.
    pub fn score_field(
        &self,
        field: &FieldDefinition,
        header: &str,
        values: &[String],
    ) -> Option<(f64, String)> {
        if let Some(pattern) = field.veto_pattern(header) {
            tracing::trace!(field = %field.canonical_name, header, pattern, "field vetoed");
            return None;
        }

        let (mut confidence, mut reasons) = match name_match(field, header) {
            Some((confidence, reason)) => (confidence, vec![reason]),
            None => (0.0, Vec::new()),
        };

        let mut boosted = false;
        for hint in &field.content_hints {
            if let Some(boost) = content::validate(*hint, values, confidence) {
                confidence = boost.confidence;
                reasons.push(boost.reason);
                boosted = true;
            }
        }

        let keep = if boosted {
            confidence > CONTENT_RETENTION
        } else {
            confidence > 0.0
        };
        keep.then(|| (confidence, reasons.join("; ")))
    }
}

impl HeaderClassifier for CatalogMatcher {
    fn name(&self) -> &'static str {
        "catalog_match"
    }

    fn classify(&self, header: &str, values: &[String], catalog: &FieldCatalog) -> Vec<Candidate> {
        catalog
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(rank, field)| {
                let (confidence, reasoning) = self.score_field(field, header, values)?;
                Some(Candidate {
                    field: field.canonical_name.clone(),
                    confidence,
                    reasoning,
                    rank,
                })
            })
            .collect()
    }
}

/// Example match first (exact beats containment), then keyword containment.
fn name_match(field: &FieldDefinition, header: &str) -> Option<(f64, String)> {
    if header.is_empty() {
        return None;
    }
    let example = field
        .examples
        .iter()
        .find(|example| example.as_str() == header)
        .or_else(|| {
            field
                .examples
                .iter()
                .find(|example| header.contains(example.as_str()) || example.contains(header))
        });
    if let Some(example) = example {
        return Some((
            EXAMPLE_MATCH,
            format!("matches known column name '{example}'"),
        ));
    }
    field
        .keywords
        .iter()
        .find(|keyword| header.contains(keyword.as_str()))
        .map(|keyword| (KEYWORD_MATCH, format!("contains keyword '{keyword}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|v| (*v).to_string()).collect()
    }

    fn best(candidates: &[Candidate]) -> &Candidate {
        candidates
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .unwrap()
    }

    #[test]
    fn exact_example_match() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify("customer_email", &[], &catalog);
        let top = best(&candidates);
        assert_eq!(top.field, "customer_email");
        assert!((top.confidence - EXAMPLE_MATCH).abs() < 1e-9);
        assert_eq!(top.reasoning, "matches known column name 'customer_email'");
    }

    #[test]
    fn keyword_match() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify("total_revenue_eur", &[], &catalog);
        let mrr = candidates.iter().find(|c| c.field == "mrr").unwrap();
        assert!((mrr.confidence - KEYWORD_MATCH).abs() < 1e-9);
        assert_eq!(mrr.reasoning, "contains keyword 'revenue'");
    }

    #[test]
    fn exclude_pattern_vetoes_customer_name() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify("app_name", &[], &catalog);
        assert!(candidates.iter().all(|c| c.field != "customer_name"));
        assert!(candidates.iter().any(|c| c.field == "feature_usage"));
    }

    #[test]
    fn email_content_without_name_signal() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify(
            "contact",
            &values(&["a@x.com", "b@y.com", "c@z.com"]),
            &catalog,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].field, "customer_email");
        assert!(candidates[0].confidence >= 0.9);
        assert_eq!(candidates[0].reasoning, "3/3 sample values contain '@'");
    }

    #[test]
    fn pure_numeric_content_is_not_retained() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify("xyz", &values(&["1", "2"]), &catalog);
        assert!(candidates.is_empty());
    }

    #[test]
    fn keyword_plus_number_boost() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify("net_revenue_usd", &values(&["100", "250.5"]), &catalog);
        let mrr = candidates.iter().find(|c| c.field == "mrr").unwrap();
        assert!((mrr.confidence - 0.90).abs() < 1e-9);
        assert!(mrr.reasoning.contains("numeric"));
    }

    #[test]
    fn ranks_follow_declaration_order() {
        let catalog = FieldCatalog::builtin();
        let candidates = CatalogMatcher.classify("company_name", &[], &catalog);
        let company = candidates.iter().find(|c| c.field == "company").unwrap();
        assert_eq!(company.rank, catalog.index_of("company").unwrap());
    }
}
