//! Chat-completion request types and validation.

use serde::Serialize;

use super::error::CompletionError;

/// Request body for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// Conversation: a system rubric followed by the user framing + text.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Max-token bound for the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// One chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

impl ChatRequest {
    /// Build the standard two-message request.
    pub fn new(model: impl Into<String>, system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
            temperature: None,
            max_tokens: None,
        }
    }

    /// Validate the request before sending.
    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.model.is_empty() {
            return Err(CompletionError::InvalidRequest("model cannot be empty".to_string()));
        }

        if self.messages.is_empty() {
            return Err(CompletionError::InvalidRequest("messages cannot be empty".to_string()));
        }

        if !self.messages.iter().any(|m| m.role == "user" && !m.content.trim().is_empty()) {
            return Err(CompletionError::InvalidRequest("at least one non-empty user message required".to_string()));
        }

        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(CompletionError::InvalidRequest(format!("temperature out of range: {t}")));
        }

        Ok(())
    }
}
