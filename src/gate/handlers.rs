//! HTTP request handlers for the gateway

use super::error::GatewayError;
use super::gateway::{ChatGateway, ChatRequest, ChatResponse};
use crate::ProviderType;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    Json,
};
use serde_json::{json, Value};

/// Gateway state shared across handlers
#[derive(Clone)]
pub struct GatewayState {
    pub gateway: ChatGateway,
}

/// Handle a chat request
pub async fn chat_handler(
    State(state): State<GatewayState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let Json(request) = payload.map_err(|e| GatewayError::validation(e.body_text()))?;
    state.gateway.handle(request).await.map(Json)
}

/// Health check: which provider credentials were present at start-up
pub async fn health_check(State(state): State<GatewayState>) -> Json<Value> {
    let registry = state.gateway.registry();
    let providers: serde_json::Map<String, Value> = ProviderType::ALL
        .iter()
        .map(|p| (p.config_key().to_string(), Value::Bool(registry.has(p.config_key()))))
        .collect();

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "providers": providers
    }))
}

/// Handle provider list request
pub async fn list_providers(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({ "providers": state.gateway.registry().keys() }))
}

/// Handle model list request for one provider
pub async fn list_models(
    State(state): State<GatewayState>,
    Path(provider): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let models = state.gateway.list_models(&provider).await?;
    Ok(Json(json!({ "provider": provider, "models": models })))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found", "path": uri.to_string() })),
    )
}
