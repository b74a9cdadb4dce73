//! Provider configuration
//!
//! Each provider is configured from the environment exactly once, at start-up:
//!
//! | Provider  | Credential          | Base URL             | Default model     |
//! |-----------|---------------------|----------------------|-------------------|
//! | openai    | `OPENAI_API_KEY`    | `OPENAI_BASE_URL`    | `OPENAI_MODEL`    |
//! | gemini    | `GEMINI_API_KEY`    | `GEMINI_BASE_URL`    | `GEMINI_MODEL`    |
//! | anthropic | `ANTHROPIC_API_KEY` | `ANTHROPIC_BASE_URL` | `ANTHROPIC_MODEL` |
//!
//! Nothing in the request path reads the environment again.

use std::fmt;
use std::time::Duration;

/// Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    /// OpenAI chat completions API
    OpenAI,
    /// Google Gemini generateContent API
    Gemini,
    /// Anthropic messages API
    Anthropic,
}

impl ProviderType {
    /// All known providers, in registration order
    pub const ALL: [ProviderType; 3] = [
        ProviderType::OpenAI,
        ProviderType::Gemini,
        ProviderType::Anthropic,
    ];

    /// Get the default API base URL for this provider type
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "https://api.openai.com/v1",
            ProviderType::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderType::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Get the model used when a request does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "gpt-4o-mini",
            ProviderType::Gemini => "gemini-2.0-flash-exp",
            ProviderType::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }

    /// Get the config key for this provider
    pub fn config_key(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "openai",
            ProviderType::Gemini => "gemini",
            ProviderType::Anthropic => "anthropic",
        }
    }

    /// Prefix shared by this provider's environment variables
    fn env_prefix(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "OPENAI",
            ProviderType::Gemini => "GEMINI",
            ProviderType::Anthropic => "ANTHROPIC",
        }
    }

    /// Environment variable holding the credential
    pub fn api_key_var(&self) -> String {
        format!("{}_API_KEY", self.env_prefix())
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Configuration for an LLM provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// Provider type
    pub provider_type: ProviderType,

    /// API base URL
    pub api_base: String,

    /// API key
    pub api_key: String,

    /// Model used when a request does not name one
    pub default_model: String,

    /// Vendor client timeout in seconds
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    600
}

// Hand-written so the credential never reaches a log line.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider_type", &self.provider_type)
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("default_model", &self.default_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a config with the provider's default base URL and model
    pub fn new(provider_type: ProviderType, api_key: impl Into<String>) -> Self {
        ProviderConfig {
            provider_type,
            api_base: provider_type.default_base_url().to_string(),
            api_key: api_key.into(),
            default_model: provider_type.default_model().to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Create OpenAI config
    pub fn openai(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(ProviderType::OpenAI, api_key).with_api_base(api_base)
    }

    /// Create Gemini config
    pub fn gemini(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(ProviderType::Gemini, api_key).with_api_base(api_base)
    }

    /// Create Anthropic config
    pub fn anthropic(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(ProviderType::Anthropic, api_key).with_api_base(api_base)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Load a provider's configuration through a variable lookup.
    ///
    /// Returns `None` when the credential is unset or empty.
    pub fn from_lookup<F>(provider_type: ProviderType, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            lookup(&format!("{}_{}", provider_type.env_prefix(), suffix))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::new(provider_type, var("API_KEY")?);
        if let Some(api_base) = var("BASE_URL") {
            config.api_base = api_base;
        }
        if let Some(model) = var("MODEL") {
            config.default_model = model;
        }
        Some(config)
    }

    /// Get the vendor client timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Get the default model
    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}
