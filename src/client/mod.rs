//! LLM client implementations
//!
//! One adapter per vendor, all behind the [`Client`] trait. Adapters never
//! retry: a single vendor failure is returned to the caller as-is.

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::{GeminiClient, GeminiTurns, Turn, TurnRole};
pub use openai::OpenAIClient;

use crate::{ChatOptions, ChatResult, Error, Message, ProviderConfig, ProviderType, Result};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Trait for LLM clients
#[async_trait::async_trait]
pub trait Client: Send + Sync {
    /// Send a chat request and return the normalized reply
    async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<ChatResult>;

    /// List the model identifiers this provider offers
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Provider this client talks to
    fn provider_type(&self) -> ProviderType;
}

/// Create an LLM client based on the provider configuration.
///
/// Returns a trait object so callers are decoupled from concrete provider
/// types. Adding a new provider only requires a new match arm here.
pub fn create_client(config: ProviderConfig) -> Result<Arc<dyn Client>> {
    Ok(match config.provider_type {
        ProviderType::OpenAI => Arc::new(OpenAIClient::new(config)?),
        ProviderType::Gemini => Arc::new(GeminiClient::new(config)?),
        ProviderType::Anthropic => Arc::new(AnthropicClient::new(config)?),
    })
}

/// Build an HTTP client with specified timeout
fn build_http_client(timeout: Duration) -> Result<HttpClient> {
    Ok(HttpClient::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()?)
}

fn ensure_not_empty(messages: &[Message]) -> Result<()> {
    if messages.is_empty() {
        return Err(Error::InvalidRequest(
            "message list must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Send a prepared request and decode a successful JSON body.
///
/// Non-success statuses become [`Error::Api`] carrying the vendor's body.
async fn send_json<T: DeserializeOwned>(provider: ProviderType, request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(%provider, status = status.as_u16(), "vendor call failed");
        return Err(Error::Api {
            provider,
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::Api {
        provider,
        status: status.as_u16(),
        message: format!("Failed to parse {} response: {}. Body: {}", provider, e, body),
    })
}
