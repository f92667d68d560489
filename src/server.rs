use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::error::TransportError;
use crate::protocol::ChatRequest;
use crate::transport::{ChatTransport, HttpTransport};
use crate::ui::build_widget_page;

/// Build the application state from configuration.
///
/// A missing upstream is not fatal: the page still loads and every chat
/// request falls back.
pub fn build_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
    let transport: Option<Arc<dyn ChatTransport>> = match &config.endpoint.upstream_url {
        Some(url) => Some(Arc::new(HttpTransport::new(url)?)),
        None => {
            warn!(
                name: "relay.upstream.missing",
                "No upstream chat endpoint configured; chat requests will fail"
            );
            None
        }
    };

    Ok(AppState { transport, config })
}

/// Build the router: widget page, relay route and request tracing.
pub fn build_router(state: AppState) -> Router {
    let chat_path = state.config.endpoint.path.clone();

    Router::new()
        .route("/", get(index_handler))
        .route(&chat_path, post(relay_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = build_state(Arc::clone(&config))?;
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        chat_path = %config.endpoint.path,
        upstream = ?config.endpoint.upstream_url,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - The widget page.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(build_widget_page(
        &state.config.widget,
        &state.config.endpoint,
    ))
}

/// POST /api/chat - Pass the request through to the upstream endpoint.
///
/// Failures answer `502` with a plain-text body, which the page script
/// cannot decode and therefore renders as the fallback bubble.
async fn relay_chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    info!(
        name: "relay.request",
        chars = req.message.len(),
        "Relaying chat request"
    );

    let Some(transport) = &state.transport else {
        return relay_failure(&TransportError::NotConfigured);
    };

    match transport.send(&req).await {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => relay_failure(&err),
    }
}

fn relay_failure(err: &TransportError) -> Response {
    error!(name: "relay.failed", error = %err, "Upstream chat request failed");
    (StatusCode::BAD_GATEWAY, format!("Upstream error: {err}")).into_response()
}
