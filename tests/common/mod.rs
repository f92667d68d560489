//! Shared fixtures: configuration and a stand-in upstream chat endpoint.

#![allow(dead_code)]

use axum::{Json, Router, http::StatusCode, routing::post};
use chat_widget::config::{
    AppConfig, EndpointConfig, LoggingConfig, ServerConfig, WidgetConfig,
};
use chat_widget::widget::FALLBACK_MESSAGE;
use serde_json::{Value, json};

/// Configuration pointing the relay at `upstream_url`.
pub fn test_config(upstream_url: Option<String>) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        endpoint: EndpointConfig {
            url: "http://127.0.0.1:3000/api/chat".to_string(),
            path: "/api/chat".to_string(),
            upstream_url,
        },
        widget: WidgetConfig {
            title: "Sim Booking".to_string(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
            escape_markup: false,
            quick_replies: vec!["List devices".to_string()],
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            json: false,
        },
    }
}

/// Upstream routes:
/// - `/api/chat` echoes the raw request body inside `response`
/// - `/reply` answers with `text`
/// - `/html` answers with a non-JSON body
/// - `/degraded` answers 500 with a valid JSON body
pub fn upstream_router(text: &'static str) -> Router {
    Router::new()
        .route(
            "/api/chat",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "response": body.to_string() }))
            }),
        )
        .route(
            "/reply",
            post(move || async move { Json(json!({ "response": text })) }),
        )
        .route(
            "/html",
            post(|| async { "<html><body>Internal error</body></html>" }),
        )
        .route(
            "/degraded",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "response": "degraded" })),
                )
            }),
        )
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("upstream server");
    });
    format!("http://{addr}")
}

/// A URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}/api/chat")
}
