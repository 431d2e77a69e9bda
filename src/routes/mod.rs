//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/catalog", get(http::http_catalog))
        // Generation
        .route("/api/v1/problem", get(http::http_get_problem))
        .route("/api/v1/problems/random", post(http::http_post_random))
        .route("/api/v1/problems/unique", post(http::http_post_unique))
        // Student data
        .route("/api/v1/settings", get(http::http_get_settings).put(http::http_put_settings))
        .route("/api/v1/progress", get(http::http_get_progress))
        // Test session
        .route(
            "/api/v1/session",
            get(http::http_get_session)
                .post(http::http_start_session)
                .delete(http::http_delete_session),
        )
        .route("/api/v1/session/answer", post(http::http_post_answer))
        .route("/api/v1/session/navigate", post(http::http_post_navigate))
        .route("/api/v1/session/finish", post(http::http_post_finish))
        .route("/api/v1/session/retake", post(http::http_post_retake))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
