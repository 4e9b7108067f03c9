//! Parsing of model answers into candidates.

use colmap_catalog::FieldCatalog;
use colmap_model::UNMAPPED;
use serde::Deserialize;

use crate::candidate::{Candidate, clamp_confidence};

const DEFAULT_REASONING: &str = "suggested by language model";

#[derive(Debug, Deserialize)]
struct ModelAnswer {
    field: String,
    confidence: f64,
    #[serde(default)]
    reasoning: String,
}

/// Turns raw completion text into a candidate.
///
/// Returns `None` when no JSON object can be found, the object does not
/// decode, the confidence is not finite, or the field is unknown.
pub fn parse_response(text: &str, catalog: &FieldCatalog) -> Option<Candidate> {
    let object = extract_json_object(text)?;
    let answer: ModelAnswer = match serde_json::from_str(object) {
        Ok(answer) => answer,
        Err(error) => {
            tracing::debug!(%error, "model answer is not the expected JSON");
            return None;
        }
    };
    if !answer.confidence.is_finite() {
        return None;
    }

    let field = answer.field.trim().to_lowercase();
    let confidence = clamp_confidence(answer.confidence);
    let reasoning = match answer.reasoning.trim() {
        "" => DEFAULT_REASONING.to_string(),
        other => other.to_string(),
    };

    if field == UNMAPPED {
        return Some(Candidate::sentinel(confidence, reasoning));
    }
    let candidate = Candidate::for_field(catalog, &field, confidence, reasoning);
    if candidate.is_none() {
        tracing::debug!(field = %field, "model suggested a field outside the catalog");
    }
    candidate
}

/// Returns the first balanced `{...}` object in `text`.
///
/// Braces inside JSON strings are ignored, so code fences and prose around
/// the object do not matter.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
