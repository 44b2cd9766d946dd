//! Completion API client error types.

use std::sync::Arc;

/// Errors from the chat-completion client.
///
/// There is no timeout variant: the analysis timeout is owned by the
/// orchestrator's race, not by this transport.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Missing PRIVRANK_API_KEY environment variable.
    #[error("missing API key: PRIVRANK_API_KEY not set")]
    MissingApiKey,

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the completion API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: status {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response contained no choices.
    #[error("empty completion: response contained no choices")]
    EmptyChoices,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Network(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompletionError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = CompletionError::HttpError { status: 500, body: "oops".to_string() };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("oops"));
    }
}
