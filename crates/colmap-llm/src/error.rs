//! Error types for completion-client setup.

use thiserror::Error;

/// Errors raised while building a completion client from configuration.
///
/// Errors during an actual completion call are reported as
/// [`CompletionError`](colmap_map::CompletionError) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LlmConfigError {
    /// No API key was supplied.
    #[error("no API key configured")]
    MissingApiKey,

    /// The base URL is not an http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The timeout is zero or not a number.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    /// The model name is blank.
    #[error("model name must not be empty")]
    EmptyModel,

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl LlmConfigError {
    /// Returns a short message suitable for CLI output.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::MissingApiKey => "Language model fallback is disabled: no API key set.",
            Self::InvalidBaseUrl(_) | Self::InvalidTimeout(_) | Self::EmptyModel => {
                "Language model settings are invalid."
            }
            Self::Client(_) => "Could not initialize the language model client.",
        }
    }
}
