//! Mock HTTP servers for testing LLM clients offline
//!
//! wiremock-based stand-ins for the OpenAI, Gemini and Anthropic APIs, so
//! tests run without real API keys.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn last_body(server: &MockServer) -> Value {
    server
        .received_requests()
        .await
        .and_then(|requests| requests.last().map(|r| r.body_json::<Value>()))
        .expect("no request recorded")
        .expect("request body is not JSON")
}

async fn count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

async fn mount_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "message": message }
        })))
        .mount(server)
        .await;
}

/// OpenAI mock server for testing
pub struct OpenAIMockServer {
    server: MockServer,
}

impl OpenAIMockServer {
    /// Create a new OpenAI mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of this mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Setup a mock response for chat completion
    pub async fn mock_chat_completion(&self, content: &str, prompt_tokens: u32, completion_tokens: u32) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-mock",
                "object": "chat.completion",
                "created": 1234567890,
                "model": "gpt-4o-mini",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": content
                    },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": prompt_tokens,
                    "completion_tokens": completion_tokens,
                    "total_tokens": prompt_tokens + completion_tokens
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup a mock model catalogue
    pub async fn mock_models(&self, ids: &[&str]) {
        let data: Vec<Value> = ids
            .iter()
            .map(|id| json!({"id": id, "object": "model", "owned_by": "openai"}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"object": "list", "data": data})),
            )
            .mount(&self.server)
            .await;
    }

    /// Setup an error response for chat completion
    pub async fn mock_error(&self, status: u16, message: &str) {
        mount_error(&self.server, status, message).await;
    }

    /// JSON body of the most recent request
    pub async fn last_request_body(&self) -> Value {
        last_body(&self.server).await
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        count(&self.server).await
    }
}

/// Gemini mock server for testing
pub struct GeminiMockServer {
    server: MockServer,
}

impl GeminiMockServer {
    /// Create a new Gemini mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of this mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Setup a generateContent response; `usage` is (prompt, candidates, total)
    pub async fn mock_generate_content(&self, model: &str, text: &str, usage: Option<(u32, u32, u32)>) {
        let mut body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        });
        if let Some((prompt, candidates, total)) = usage {
            body["usageMetadata"] = json!({
                "promptTokenCount": prompt,
                "candidatesTokenCount": candidates,
                "totalTokenCount": total
            });
        }

        Mock::given(method("POST"))
            .and(path(format!("/models/{}:generateContent", model)))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup a mock model catalogue with one embedding-only entry
    pub async fn mock_models(&self) {
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {
                        "name": "models/gemini-1.5-pro",
                        "supportedGenerationMethods": ["generateContent", "countTokens"]
                    },
                    {
                        "name": "models/text-embedding-004",
                        "supportedGenerationMethods": ["embedContent"]
                    },
                    {
                        "name": "models/gemini-2.0-flash-exp",
                        "supportedGenerationMethods": ["generateContent"]
                    }
                ]
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup an error response for generateContent
    pub async fn mock_error(&self, status: u16, message: &str) {
        mount_error(&self.server, status, message).await;
    }

    /// JSON body of the most recent request
    pub async fn last_request_body(&self) -> Value {
        last_body(&self.server).await
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        count(&self.server).await
    }
}

/// Anthropic mock server for testing
pub struct AnthropicMockServer {
    server: MockServer,
}

impl AnthropicMockServer {
    /// Create a new Anthropic mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of this mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Setup a mock response for the messages endpoint
    pub async fn mock_message(&self, content: &str, input_tokens: u32, output_tokens: u32) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg-mock",
                "type": "message",
                "role": "assistant",
                "content": [{
                    "type": "text",
                    "text": content
                }],
                "model": "claude-3-5-sonnet-20241022",
                "stop_reason": "end_turn",
                "usage": {
                    "input_tokens": input_tokens,
                    "output_tokens": output_tokens
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup an error response for the messages endpoint
    pub async fn mock_error(&self, status: u16, message: &str) {
        mount_error(&self.server, status, message).await;
    }

    /// JSON body of the most recent request
    pub async fn last_request_body(&self) -> Value {
        last_body(&self.server).await
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        count(&self.server).await
    }
}
