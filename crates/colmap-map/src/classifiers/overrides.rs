//! Literal header overrides for known ambiguous abbreviations.

use colmap_catalog::FieldCatalog;

use super::HeaderClassifier;
use crate::candidate::Candidate;

/// Maps one exact (normalized) header to a field at a fixed confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    pub header: &'static str,
    pub field: &'static str,
    pub confidence: f64,
}

/// Generic matching gets these wrong: `cli_name` is not a CLI, and
/// `app_name` would otherwise match the `name` keyword of `customer_name`.
const DEFAULT_RULES: &[OverrideRule] = &[
    OverrideRule {
        header: "cli_name",
        field: "customer_name",
        confidence: 0.90,
    },
    OverrideRule {
        header: "client_name",
        field: "customer_name",
        confidence: 0.90,
    },
    OverrideRule {
        header: "app_name",
        field: "feature_usage",
        confidence: 0.85,
    },
    OverrideRule {
        header: "application_name",
        field: "feature_usage",
        confidence: 0.85,
    },
];

/// Fixed table of exact header matches.
#[derive(Debug, Clone)]
pub struct LiteralOverrides {
    rules: Vec<OverrideRule>,
}

impl LiteralOverrides {
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// Returns the rule matching `header` exactly, if any.
    pub fn lookup(&self, header: &str) -> Option<&OverrideRule> {
        self.rules.iter().find(|rule| rule.header == header)
    }
}

impl Default for LiteralOverrides {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl HeaderClassifier for LiteralOverrides {
    fn name(&self) -> &'static str {
        "literal_override"
    }

    fn classify(
        &self,
        header: &str,
        _values: &[String],
        catalog: &FieldCatalog,
    ) -> Vec<Candidate> {
        let Some(rule) = self.lookup(header) else {
            return Vec::new();
        };
        // Rules pointing at fields a custom catalog lacks are ignored.
        Candidate::for_field(
            catalog,
            rule.field,
            rule.confidence,
            format!("'{}' is a known alias of {}", rule.header, rule.field),
        )
        .into_iter()
        .collect()
    }
}
