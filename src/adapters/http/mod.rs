//! HTTP adapters - REST API implementations.
//!
//! [`build_app_router`] assembles the chat and learner routers behind the
//! shared middleware stack. The binary and the integration tests both go
//! through it.

pub mod chat;
pub mod error;
pub mod learner;

pub use chat::{chat_routes, ChatHandlers};
pub use error::{ApiError, ErrorResponse};
pub use learner::{learner_routes, LearnerHandlers};

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;

/// Builds the full application router with all middleware layers.
///
/// The request timeout covers the learner routes only. Chat requests are
/// bounded by the provider's own timeout so the advice pipeline always
/// runs to completion and logs its outcome.
pub fn build_app_router(chat: ChatHandlers, learner: LearnerHandlers, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let learner = learner_routes(learner).layer(TimeoutLayer::new(config.request_timeout()));

    Router::new()
        .route("/health", get(health))
        .nest("/api/chat", chat_routes(chat))
        .nest("/api", learner)
        // Applied bottom-up: CORS runs first, id propagation last.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// Builds the CORS layer from the configured origin list.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// GET /health - Liveness probe
async fn health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}
