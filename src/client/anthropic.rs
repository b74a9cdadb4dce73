//! Anthropic messages adapter

use super::{build_http_client, ensure_not_empty, send_json, Client};
use crate::{
    ChatOptions, ChatResult, Error, Message, MessageRole, ProviderConfig, ProviderType, Result,
    Usage,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Models known to the messages API.
///
/// Anthropic publishes no listing endpoint this adapter relies on, so the
/// list is pinned here and must be updated when new models ship.
pub const KNOWN_MODELS: &[&str] = &[
    "claude-3-5-sonnet-20241022",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

/// Anthropic client implementation
pub struct AnthropicClient {
    config: ProviderConfig,
    http_client: HttpClient,
}

impl AnthropicClient {
    /// Create a new Anthropic client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Ok(AnthropicClient {
            http_client: build_http_client(config.timeout())?,
            config,
        })
    }
}

/// Hoist the system message into its own field.
///
/// When several system messages are present the last one wins.
fn split_system(messages: &[Message]) -> (Option<&str>, Vec<AnthropicMessage<'_>>) {
    let mut system = None;
    let mut converted = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            MessageRole::System => system = Some(message.content.as_str()),
            MessageRole::Assistant => converted.push(AnthropicMessage {
                role: "assistant",
                content: &message.content,
            }),
            MessageRole::User => converted.push(AnthropicMessage {
                role: "user",
                content: &message.content,
            }),
        }
    }

    (system, converted)
}

#[async_trait::async_trait]
impl Client for AnthropicClient {
    async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<ChatResult> {
        ensure_not_empty(messages)?;
        let (system, messages) = split_system(messages);

        let request = AnthropicMessageRequest {
            model: options.model_or(self.config.default_model()),
            messages,
            system,
            max_tokens: options.max_tokens(),
            temperature: options.temperature(),
        };
        tracing::debug!(
            model = request.model,
            messages = request.messages.len(),
            has_system = system.is_some(),
            "anthropic chat"
        );

        let url = format!("{}/v1/messages", self.config.api_base());
        let response: AnthropicMessageResponse = send_json(
            ProviderType::Anthropic,
            self.http_client
                .post(url)
                .header("x-api-key", self.config.api_key())
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request),
        )
        .await?;

        let text = response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| Error::Api {
                provider: ProviderType::Anthropic,
                status: 200,
                message: "Anthropic response contained no content blocks".to_string(),
            })?;

        Ok(ChatResult {
            content: text,
            model: response.model,
            usage: Usage::from_parts(response.usage.input_tokens, response.usage.output_tokens),
        })
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(KNOWN_MODELS.iter().map(|m| m.to_string()).collect())
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Anthropic
    }
}

// Anthropic types

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicMessageRequest<'a> {
    model: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct AnthropicMessageResponse {
    model: String,
    content: Vec<AnthropicContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
