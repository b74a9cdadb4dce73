//! Chat gateway core: validation, provider resolution and dispatch

use super::error::GatewayError;
use crate::{ChatOptions, Message, ProviderRegistry, Usage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Provider used when a request does not name one
pub const DEFAULT_PROVIDER: &str = "openai";

const MESSAGES_REQUIRED: &str = "Field \"messages\" is required and must be a non-empty array";

/// Inbound chat request.
///
/// `messages` stays untyped until validation so a missing or malformed list
/// yields the gateway's own validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Value>,

    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub provider: String,
    pub model: String,
    pub message: String,
    pub usage: Usage,
}

/// Stateless dispatcher over a shared, read-only registry
#[derive(Clone)]
pub struct ChatGateway {
    registry: Arc<ProviderRegistry>,
}

impl ChatGateway {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        ChatGateway { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Validate, route and execute a single chat request
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError> {
        let messages = parse_messages(request.messages)?;
        let provider = request
            .provider
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let client = self.resolve(&provider)?;

        // An empty model name counts as omitted.
        let options = ChatOptions {
            model: request.model.filter(|m| !m.is_empty()),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        info!(%provider, messages = messages.len(), "processing chat request");
        let result = client.chat(&messages, &options).await.map_err(|e| {
            error!(%provider, error = %e, "chat request failed");
            GatewayError::from(e)
        })?;

        Ok(ChatResponse {
            provider,
            model: result.model,
            message: result.content,
            usage: result.usage,
        })
    }

    /// List the models a configured provider offers
    pub async fn list_models(&self, provider: &str) -> Result<Vec<String>, GatewayError> {
        let client = self.resolve(provider)?;
        client.list_models().await.map_err(|e| {
            error!(%provider, error = %e, "listing models failed");
            GatewayError::from(e)
        })
    }

    fn resolve(&self, provider: &str) -> Result<&dyn crate::Client, GatewayError> {
        self.registry
            .get(provider)
            .ok_or_else(|| GatewayError::Validation {
                error: format!("Provider \"{}\" is not configured or does not exist", provider),
                available_providers: Some(
                    self.registry.keys().into_iter().map(str::to_string).collect(),
                ),
            })
    }
}

fn parse_messages(messages: Option<Value>) -> Result<Vec<Message>, GatewayError> {
    match messages {
        Some(Value::Array(items)) if !items.is_empty() => {
            serde_json::from_value(Value::Array(items))
                .map_err(|e| GatewayError::validation(format!("Invalid message: {}", e)))
        }
        _ => Err(GatewayError::validation(MESSAGES_REQUIRED)),
    }
}
