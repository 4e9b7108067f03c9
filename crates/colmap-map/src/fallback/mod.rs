//! Model-backed fallback classification.
//!
//! Used only when the heuristics are inconclusive. The classifier talks to a
//! [`TextCompletionClient`] and never fails the surrounding request: any
//! transport or parse problem is logged and treated as "no candidate".

pub mod parser;
pub mod prompt;

use std::sync::Arc;

use colmap_catalog::FieldCatalog;
use thiserror::Error;

use crate::candidate::Candidate;
use crate::classifiers::LiteralOverrides;
use crate::redact::log_data_enabled;

pub use parser::{extract_json_object, parse_response};
pub use prompt::build_prompt;

/// Errors a completion backend can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompletionError {
    /// No credential or endpoint is configured.
    #[error("completion service is not configured")]
    Unavailable,

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The call did not finish within its deadline.
    #[error("completion request timed out")]
    Timeout,

    /// Non-success HTTP status.
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered with an unexpected payload.
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Narrow interface to a text-completion service.
pub trait TextCompletionClient: Send + Sync {
    /// Sends `prompt` and returns the raw completion text.
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Classifies a header by asking a language model.
#[derive(Clone)]
pub struct FallbackClassifier {
    client: Arc<dyn TextCompletionClient>,
    overrides: LiteralOverrides,
}

impl FallbackClassifier {
    pub fn new(client: Arc<dyn TextCompletionClient>) -> Self {
        Self {
            client,
            overrides: LiteralOverrides::default(),
        }
    }

    /// Uses custom override rules for the prompt's disambiguation notes.
    #[must_use]
    pub fn with_overrides(mut self, overrides: LiteralOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Asks the model to classify `header`.
    ///
    /// Returns `None` on any failure; never propagates errors.
    pub fn classify_with_model(
        &self,
        header: &str,
        all_headers: &[String],
        sample_values: &[String],
        catalog: &FieldCatalog,
    ) -> Option<Candidate> {
        let prompt = build_prompt(header, all_headers, sample_values, catalog, &self.overrides);
        if log_data_enabled() {
            tracing::trace!(header, %prompt, "fallback prompt");
        }

        let text = match self.client.complete(&prompt) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(header, %error, "model fallback failed");
                return None;
            }
        };

        let candidate = parse_response(&text, catalog);
        if candidate.is_none() {
            tracing::warn!(header, "model fallback returned an unusable answer");
        }
        candidate
    }
}

impl std::fmt::Debug for FallbackClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackClassifier")
            .field("overrides", &self.overrides.rules().len())
            .finish_non_exhaustive()
    }
}
