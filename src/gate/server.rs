//! Gateway HTTP server

use crate::gate::config::GatewayConfig;
use crate::gate::gateway::ChatGateway;
use crate::gate::handlers::{self, GatewayState};
use crate::ProviderRegistry;
use anyhow::Context;
use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{info, info_span, warn, Instrument};

/// Build the gateway router over a registry
pub fn router(registry: Arc<ProviderRegistry>) -> Router {
    let state = GatewayState {
        gateway: ChatGateway::new(registry),
    };

    Router::new()
        .route("/chat", post(handlers::chat_handler))
        // Utility endpoints
        .route("/health", get(handlers::health_check))
        .route("/providers", get(handlers::list_providers))
        .route("/models/:provider", get(handlers::list_models))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
}

/// Start the gateway server
pub async fn start_server(config: GatewayConfig, registry: ProviderRegistry) -> anyhow::Result<()> {
    config.validate()?;

    if registry.is_empty() {
        warn!("No provider credentials configured; every chat request will be rejected");
    } else {
        info!("Configured providers: {}", registry.keys().join(", "));
    }

    let app = router(Arc::new(registry));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Starting Gateway on http://{}", addr);
    info!("Chat endpoint: http://{}/chat", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Logging middleware
async fn logging_middleware(req: Request, next: Next) -> axum::response::Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let span = info_span!("request", id = %uuid::Uuid::new_v4());

    async move {
        let response = next.run(req).await;
        info!("{} {} {} {:?}", method, uri, response.status(), start.elapsed());
        response
    }
    .instrument(span)
    .await
}
