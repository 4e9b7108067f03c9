//! Canonical field definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract shape of the values a field is expected to hold.
///
/// Content hints let the mapping engine validate a candidate column against
/// its sample data instead of relying on the header alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentHint {
    /// Free text.
    Text,
    /// Numeric values (amounts, counts, scores).
    Number,
    /// Calendar dates.
    Date,
    /// Email addresses.
    Email,
}

impl ContentHint {
    /// Returns the lowercase tag used in catalogs and prompts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ContentHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One canonical target field a source column can be mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Unique identifier of the field (e.g. `customer_email`).
    pub canonical_name: String,
    /// Short display label.
    #[serde(default)]
    pub label: String,
    /// Lowercase substrings that weakly suggest this field.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Lowercase header strings known to denote this field.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Substrings that veto this field when present in a header.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    /// Expected shapes of the column values.
    #[serde(default)]
    pub content_hints: Vec<ContentHint>,
}

impl FieldDefinition {
    /// Creates a field with no matching metadata.
    pub fn new(canonical_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            label: label.into(),
            keywords: Vec::new(),
            examples: Vec::new(),
            exclude_patterns: Vec::new(),
            content_hints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| (*k).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(|e| (*e).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_exclude_patterns(mut self, patterns: &[&str]) -> Self {
        self.exclude_patterns = patterns.iter().map(|p| (*p).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_content_hints(mut self, hints: &[ContentHint]) -> Self {
        self.content_hints = hints.to_vec();
        self
    }

    /// Returns the first exclude pattern contained in the lowercase header.
    pub fn veto_pattern(&self, lowercase_header: &str) -> Option<&str> {
        self.exclude_patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| !pattern.is_empty() && lowercase_header.contains(pattern))
    }
}
