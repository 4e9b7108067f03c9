//! Configuration for the completion client.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Completion calls slower than this are abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub const ENV_API_KEY: &str = "COLMAP_LLM_API_KEY";
pub const ENV_BASE_URL: &str = "COLMAP_LLM_BASE_URL";
pub const ENV_MODEL: &str = "COLMAP_LLM_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "COLMAP_LLM_TIMEOUT_SECS";

/// Settings for an OpenAI-compatible chat-completion endpoint.
///
/// Loaded from an `[llm]` TOML table, the environment, or both (environment
/// wins). The API key is never serialized.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Endpoint root; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl LlmConfig {
    /// Builds a configuration from the process environment.
    pub fn from_env() -> Result<Self, LlmConfigError> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `COLMAP_LLM_*` variables on top of this configuration.
    ///
    /// `lookup` abstracts the environment so callers and tests can supply
    /// their own source. Blank values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, LlmConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = model;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .parse()
                .map_err(|_| LlmConfigError::InvalidTimeout(raw.clone()))?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Returns true if an API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Checks everything except the API key.
    pub fn validate(&self) -> Result<(), LlmConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(LlmConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(LlmConfigError::InvalidTimeout("0".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(LlmConfigError::EmptyModel);
        }
        Ok(())
    }
}
