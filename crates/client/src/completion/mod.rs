//! Remote analyzer client for chat-completion endpoints.
//!
//! Provides a client for OpenAI-compatible chat-completion APIs with request
//! validation and response normalization.
//!
//! ### Specification
//!
//! - **Endpoint**: `POST {base_url}/chat/completions`
//! - **Authentication**: `Authorization: Bearer <key>` header.
//! - **Body**: model identifier, a system message (the scoring rubric), a
//!   user message (framing + extracted page text), temperature, max tokens.
//! - **Result**: the first choice's message content is the raw analysis text.
//! - **Timeouts**: none at this layer. The orchestrator races the call
//!   against its own timer, so the HTTP client is built without one.

pub mod error;
pub mod request;
pub mod response;

pub use error::CompletionError;
pub use request::{ChatMessage, ChatRequest};
pub use response::{ChatApiResponse, CompletionResponse};

use async_trait::async_trait;
use reqwest::header;
use std::time::Instant;

/// Default base URL for the completion API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Default max-token bound for the analysis response.
const DEFAULT_MAX_TOKENS: u32 = 700;

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "privrank/0.1";

/// Completion API client configuration.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API key from PRIVRANK_API_KEY env var.
    pub api_key: String,
    /// Base URL (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Max-token bound for the response.
    pub max_tokens: u32,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CompletionConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads PRIVRANK_API_KEY from environment. Returns error if not set.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = std::env::var("PRIVRANK_API_KEY").map_err(|_| CompletionError::MissingApiKey)?;

        Ok(Self { api_key, ..Default::default() })
    }
}

impl From<&privrank_core::AppConfig> for CompletionConfig {
    fn from(config: &privrank_core::AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// The remote analyzer boundary: one operation, prompt in, raw text out.
///
/// The orchestrator depends on this trait rather than the concrete client so
/// tests can count and script remote calls without a network.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, CompletionError>;
}

/// Chat-completion API client.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Create a new completion client with the given configuration.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(CompletionError::from)?;

        Ok(Self { http, config })
    }

    /// Create a new completion client from environment variables.
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(CompletionConfig::from_env()?)
    }

    /// Send one completion request and return the normalized response.
    ///
    /// This method handles request validation, status mapping, and response
    /// normalization.
    pub async fn send(&self, system_prompt: &str, user_prompt: &str) -> Result<CompletionResponse, CompletionError> {
        let mut req = ChatRequest::new(&self.config.model, system_prompt, user_prompt);
        req.temperature = Some(self.config.temperature);
        req.max_tokens = Some(self.config.max_tokens);
        req.validate()?;

        let start = Instant::now();
        let url = format!("{}/chat/completions", self.config.base_url);

        tracing::debug!("requesting completion: model={}", req.model);

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(CompletionError::from)?;

        let status = http_response.status();
        tracing::debug!("completion API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthError);
        }

        if status == 429 {
            return Err(CompletionError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(CompletionError::HttpError { status: status.as_u16(), body });
        }

        let bytes = http_response.bytes().await.map_err(CompletionError::from)?;
        let api_response: ChatApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| CompletionError::Parse(e.to_string()))?;

        let normalized = CompletionResponse::from_api(api_response, start)?;

        tracing::debug!(
            "completion finished in {}ms, {} chars",
            normalized.latency_ms,
            normalized.text.len()
        );

        Ok(normalized)
    }
}

#[async_trait]
impl CompletionTransport for CompletionClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, CompletionError> {
        Ok(self.send(system_prompt, user_prompt).await?.text)
    }
}
