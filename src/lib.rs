//! Multi-provider chat gateway
//!
//! Adapts a provider-agnostic message list to OpenAI, Gemini and Anthropic
//! chat APIs and normalizes their replies into a single [`ChatResult`].
pub mod client;
mod config;
mod message;
mod registry;

#[cfg(feature = "gate")]
pub mod gate;

#[cfg(test)]
mod mock_server;

use thiserror::Error;

/// Result type for chat-gate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for chat-gate operations
#[derive(Debug, Error)]
pub enum Error {
    /// Vendor API returned a non-success status
    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: ProviderType,
        status: u16,
        message: String,
    },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request rejected locally before reaching the vendor
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry credentials in query strings.
        Error::Http(err.without_url())
    }
}

impl Error {
    /// HTTP status reported by the vendor, if the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the vendor rejected the configured credential
    pub fn is_authentication(&self) -> bool {
        match self {
            Error::Api {
                provider: ProviderType::Gemini,
                status: 400,
                message,
            } => message.contains("API_KEY_INVALID"),
            _ => self.status() == Some(401),
        }
    }

    /// Whether the vendor throttled the request
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

pub use client::{create_client, Client};
pub use config::{ProviderConfig, ProviderType};
pub use message::{ChatOptions, ChatResult, Message, MessageRole, Usage};
pub use registry::ProviderRegistry;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(provider: ProviderType, status: u16, message: &str) -> Error {
        Error::Api {
            provider,
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_authentication_classification() {
        assert!(api_error(ProviderType::OpenAI, 401, "bad key").is_authentication());
        assert!(api_error(ProviderType::Anthropic, 401, "bad key").is_authentication());
        assert!(api_error(
            ProviderType::Gemini,
            400,
            r#"{"error":{"status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#
        )
        .is_authentication());
        assert!(!api_error(ProviderType::Gemini, 400, "contents is empty").is_authentication());
        assert!(!api_error(ProviderType::OpenAI, 500, "boom").is_authentication());
    }

    #[test]
    fn test_rate_limit_classification() {
        assert!(api_error(ProviderType::OpenAI, 429, "slow down").is_rate_limited());
        assert!(!api_error(ProviderType::OpenAI, 401, "bad key").is_rate_limited());
        assert!(!Error::InvalidRequest("empty".into()).is_rate_limited());
    }

    #[test]
    fn test_api_error_display() {
        let err = api_error(ProviderType::Anthropic, 529, "overloaded");
        assert_eq!(err.to_string(), "anthropic API error (529): overloaded");
    }
}
