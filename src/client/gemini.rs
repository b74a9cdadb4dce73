//! Gemini generateContent adapter
//!
//! Gemini has no system role and models a conversation as a turn history
//! plus the turn being sent. [`GeminiTurns::from_messages`] performs that
//! split; the wire request is `history` followed by `current`.

use super::{build_http_client, ensure_not_empty, send_json, Client};
use crate::{
    ChatOptions, ChatResult, Error, Message, MessageRole, ProviderConfig, ProviderType, Result,
    Usage,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

/// Marker prepended to system content in the synthetic user turn
pub const SYSTEM_INSTRUCTION_MARKER: &str = "[System instructions]";

/// Model-side acknowledgment that follows a synthetic system turn
pub const SYSTEM_ACKNOWLEDGMENT: &str = "Understood. I will follow these instructions.";

/// Generation method a model must support to be listed
const GENERATE_CONTENT: &str = "generateContent";

/// Speaker of a Gemini turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// A single turn on the Gemini wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub parts: Vec<Part>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: TurnRole::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Turn {
            role: TurnRole::Model,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// A canonical message list partitioned into Gemini's chat-session shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiTurns {
    /// Turns the session is seeded with
    pub history: Vec<Turn>,
    /// Text of the turn sent to the model
    pub current: String,
}

impl GeminiTurns {
    /// Partition `messages` into history and current turn.
    ///
    /// The last message must come from the user; it is sent as the current
    /// turn and never appears in the history.
    pub fn from_messages(messages: &[Message]) -> Result<Self> {
        let (last, earlier) = messages.split_last().ok_or_else(|| {
            Error::InvalidRequest("message list must not be empty".to_string())
        })?;

        if last.role != MessageRole::User {
            return Err(Error::InvalidRequest(format!(
                "gemini requires the last message to come from the user, got {:?}",
                last.role
            )));
        }

        let mut history = Vec::with_capacity(earlier.len() + 1);
        for message in earlier {
            match message.role {
                MessageRole::System => {
                    history.push(Turn::user(format!(
                        "{}\n{}",
                        SYSTEM_INSTRUCTION_MARKER, message.content
                    )));
                    history.push(Turn::model(SYSTEM_ACKNOWLEDGMENT));
                }
                MessageRole::User => history.push(Turn::user(message.content.as_str())),
                MessageRole::Assistant => history.push(Turn::model(message.content.as_str())),
            }
        }

        Ok(GeminiTurns {
            history,
            current: last.content.clone(),
        })
    }

    /// Full wire contents: history followed by the current turn
    fn into_contents(self) -> Vec<Turn> {
        let mut contents = self.history;
        contents.push(Turn::user(self.current));
        contents
    }
}

/// Gemini client implementation
pub struct GeminiClient {
    config: ProviderConfig,
    http_client: HttpClient,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Ok(GeminiClient {
            http_client: build_http_client(config.timeout())?,
            config,
        })
    }
}

#[async_trait::async_trait]
impl Client for GeminiClient {
    async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<ChatResult> {
        ensure_not_empty(messages)?;
        let turns = GeminiTurns::from_messages(messages)?;

        let model = options.model_or(self.config.default_model()).to_string();
        tracing::debug!(model = %model, history = turns.history.len(), "gemini chat");

        let request = GenerateContentRequest {
            contents: turns.into_contents(),
            generation_config: GenerationConfig {
                temperature: options.temperature(),
                max_output_tokens: options.max_tokens(),
            },
        };

        let url = format!("{}/models/{}:generateContent", self.config.api_base(), model);
        let response: GenerateContentResponse = send_json(
            ProviderType::Gemini,
            self.http_client
                .post(url)
                .header("x-goog-api-key", self.config.api_key())
                .json(&request),
        )
        .await?;

        let content = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .ok_or_else(|| Error::Api {
                provider: ProviderType::Gemini,
                status: 200,
                message: "No candidates in Gemini response".to_string(),
            })?;

        Ok(ChatResult {
            content,
            model,
            usage: response.usage_metadata.unwrap_or_default().into_usage(),
        })
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", self.config.api_base());
        let response: ModelList = send_json(
            ProviderType::Gemini,
            self.http_client
                .get(url)
                .header("x-goog-api-key", self.config.api_key()),
        )
        .await?;

        Ok(response
            .models
            .into_iter()
            .filter(|m| m.supported_generation_methods.iter().any(|g| g == GENERATE_CONTENT))
            .map(|m| {
                m.name
                    .strip_prefix("models/")
                    .map(str::to_string)
                    .unwrap_or(m.name)
            })
            .collect())
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Gemini
    }
}

// Gemini types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Turn>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

impl UsageMetadata {
    fn into_usage(self) -> Usage {
        let usage = Usage::from_parts(
            self.prompt_token_count.unwrap_or(0),
            self.candidates_token_count.unwrap_or(0),
        );
        match self.total_token_count {
            Some(total_tokens) => Usage { total_tokens, ..usage },
            None => usage,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelEntry {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}
