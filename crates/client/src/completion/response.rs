//! Chat-completion response types and normalization.

use serde::Deserialize;
use std::time::Instant;

use super::error::CompletionError;

/// Raw response body from the chat-completion endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatApiResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message inside a choice.
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: i64,
    #[serde(default)]
    pub completion_tokens: i64,
    #[serde(default)]
    pub total_tokens: i64,
}

/// Normalized completion result for internal use.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The first choice's message content: the raw text to parse.
    pub text: String,
    /// Model the endpoint reports having used.
    pub model: Option<String>,
    pub finish_reason: Option<String>,
    /// Round-trip time in milliseconds.
    pub latency_ms: u64,
}

impl CompletionResponse {
    /// Normalize a raw API response, taking the first choice.
    pub fn from_api(raw: ChatApiResponse, start: Instant) -> Result<Self, CompletionError> {
        let mut choices = raw.choices;
        if choices.is_empty() {
            return Err(CompletionError::EmptyChoices);
        }
        let first = choices.swap_remove(0);

        Ok(Self {
            text: first.message.content,
            model: raw.model,
            finish_reason: first.finish_reason,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "id": "chatcmpl-123",
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Rating: 6/10\nGood:\n* Encrypted\nBad:\n* Trackers"
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 900,
            "completion_tokens": 120,
            "total_tokens": 1020
        }
    }"#;

    #[test]
    fn test_deserialize_api_response() {
        let response: ChatApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(response.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].message.content.contains("Rating: 6/10"));
        assert_eq!(response.usage.unwrap().total_tokens, 1020);
    }

    #[test]
    fn test_normalize_takes_first_choice() {
        let raw: ChatApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let normalized = CompletionResponse::from_api(raw, Instant::now()).unwrap();

        assert!(normalized.text.starts_with("Rating: 6/10"));
        assert_eq!(normalized.finish_reason.as_deref(), Some("stop"));
        assert_eq!(normalized.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let raw: ChatApiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let result = CompletionResponse::from_api(raw, Instant::now());
        assert!(matches!(result, Err(CompletionError::EmptyChoices)));
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"choices": [{"message": {"content": "hello"}}]}"#;
        let raw: ChatApiResponse = serde_json::from_str(json).unwrap();
        let normalized = CompletionResponse::from_api(raw, Instant::now()).unwrap();

        assert_eq!(normalized.text, "hello");
        assert!(normalized.model.is_none());
        assert!(normalized.finish_reason.is_none());
    }
}
