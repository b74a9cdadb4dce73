//! OpenAI chat completions adapter

use super::{build_http_client, ensure_not_empty, send_json, Client};
use crate::{ChatOptions, ChatResult, Error, Message, ProviderConfig, ProviderType, Result, Usage};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

/// Substring that marks chat models in the OpenAI catalogue
const MODEL_FAMILY: &str = "gpt";

/// OpenAI client implementation
pub struct OpenAIClient {
    config: ProviderConfig,
    http_client: HttpClient,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Ok(OpenAIClient {
            http_client: build_http_client(config.timeout())?,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base(), path)
    }
}

#[async_trait::async_trait]
impl Client for OpenAIClient {
    async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<ChatResult> {
        ensure_not_empty(messages)?;

        let request = ChatRequest {
            model: options.model_or(self.config.default_model()),
            messages,
            temperature: options.temperature(),
            max_tokens: options.max_tokens(),
        };
        tracing::debug!(model = request.model, messages = messages.len(), "openai chat");

        let response: ChatResponse = send_json(
            ProviderType::OpenAI,
            self.http_client
                .post(self.url("chat/completions"))
                .bearer_auth(self.config.api_key())
                .json(&request),
        )
        .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api {
                provider: ProviderType::OpenAI,
                status: 200,
                message: "No choices in OpenAI response".to_string(),
            })?;

        Ok(ChatResult {
            content: choice.message.content.unwrap_or_default(),
            model: response.model,
            usage: Usage {
                prompt_tokens: response.usage.prompt_tokens,
                completion_tokens: response.usage.completion_tokens,
                total_tokens: response.usage.total_tokens,
            },
        })
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let response: ModelList = send_json(
            ProviderType::OpenAI,
            self.http_client
                .get(self.url("models"))
                .bearer_auth(self.config.api_key()),
        )
        .await?;

        Ok(response
            .data
            .into_iter()
            .map(|m| m.id)
            .filter(|id| id.contains(MODEL_FAMILY))
            .collect())
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAI
    }
}

// OpenAI types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}
