//! Message types for LLM communication

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (sets behavior)
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,

    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Message::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Message::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::new(MessageRole::Assistant, content)
    }
}

/// Per-call overrides. Absent fields fall back to the adapter's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    /// Default sampling temperature
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;

    /// Default completion token cap
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(Self::DEFAULT_MAX_TOKENS)
    }

    /// The requested model, or `default` when none (or an empty name) was given
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,

    /// Number of tokens in the completion
    pub completion_tokens: u32,

    /// Total number of tokens
    pub total_tokens: u32,
}

impl Usage {
    /// Usage for vendors that only report the two components.
    ///
    /// The total saturates at `u32::MAX` rather than wrapping.
    pub fn from_parts(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Normalized reply of a single chat call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    /// Generated text
    pub content: String,

    /// Model that produced the reply
    pub model: String,

    /// Token accounting for the call
    pub usage: Usage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_role_wire_format() {
        let msg: Message = serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(msg, Message::assistant("hi"));
        assert!(serde_json::from_str::<Message>(r#"{"role":"tool","content":"x"}"#).is_err());
    }

    #[test]
    fn test_chat_options_defaults() {
        let options = ChatOptions::default();
        assert_eq!(options.temperature(), 0.7);
        assert_eq!(options.max_tokens(), 1000);
        assert_eq!(options.model_or("gpt-4o-mini"), "gpt-4o-mini");

        let options = ChatOptions {
            model: Some("gpt-4o".into()),
            temperature: Some(0.0),
            max_tokens: Some(16),
        };
        assert_eq!(options.temperature(), 0.0);
        assert_eq!(options.max_tokens(), 16);
        assert_eq!(options.model_or("gpt-4o-mini"), "gpt-4o");

        let options = ChatOptions {
            model: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(options.model_or("gpt-4o-mini"), "gpt-4o-mini");
    }

    #[test]
    fn test_usage_from_parts() {
        let usage = Usage::from_parts(12, 30);
        assert_eq!(usage.total_tokens, 42);
    }

    #[test]
    fn test_usage_from_parts_saturates() {
        let usage = Usage::from_parts(u32::MAX, 1);
        assert_eq!(usage.prompt_tokens, u32::MAX);
        assert_eq!(usage.completion_tokens, 1);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn test_usage_serializes_camel_case() {
        let value = serde_json::to_value(Usage::from_parts(1, 1)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"promptTokens": 1, "completionTokens": 1, "totalTokens": 2})
        );
    }
}
