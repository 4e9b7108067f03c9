//! Blocking chat-completion client.

use colmap_map::{CompletionError, TextCompletionClient};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value;

use crate::config::LlmConfig;
use crate::error::LlmConfigError;

/// System message sent with every request.
pub const SYSTEM_PROMPT: &str =
    "You classify spreadsheet columns. Return JSON only, no text.";

const TEMPERATURE: f64 = 0.1;

/// Longest error body kept in [`CompletionError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("colmap/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// Every call is bounded by the configured timeout; a timeout is reported as
/// [`CompletionError::Timeout`] and the mapping engine treats it like any
/// other unavailable answer.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionClient {
    /// Creates a client from a validated configuration.
    ///
    /// Fails with [`LlmConfigError::MissingApiKey`] when no key is set.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmConfigError> {
        config.validate()?;
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(LlmConfigError::MissingApiKey)?
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmConfigError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Builds a client only when an API key is configured.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, LlmConfigError> {
        if !config.is_configured() {
            tracing::info!("no API key configured, language model fallback disabled");
            return Ok(None);
        }
        Self::new(config).map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextCompletionClient for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "requesting completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest::new(&self.model, prompt))
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| CompletionError::Malformed(format!("response is not JSON: {e}")))?;
        extract_content(&payload)
    }
}

/// Returns `choices[0].message.content` from a chat-completion payload.
pub fn extract_content(payload: &Value) -> Result<String, CompletionError> {
    payload
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            CompletionError::Malformed("missing choices[0].message.content".to_string())
        })
}

fn transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Network(err.to_string())
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
