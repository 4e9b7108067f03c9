#![deny(unsafe_code)]

//! OpenAI-compatible chat-completion client for the mapping fallback.
//!
//! [`ChatCompletionClient`] implements
//! [`TextCompletionClient`](colmap_map::TextCompletionClient), so an engine can
//! be given one with `with_completion_client`. Without an API key no client is
//! built and the engine runs on heuristics alone.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ChatCompletionClient, SYSTEM_PROMPT, extract_content};
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL,
    ENV_TIMEOUT_SECS, LlmConfig,
};
pub use error::LlmConfigError;
