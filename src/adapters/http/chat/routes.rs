//! HTTP routes for the chat endpoint.

use axum::{routing::post, Router};

use super::handlers::{submit_chat_message, ChatHandlers};

/// Creates the chat router, mounted at `/api/chat`.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", post(submit_chat_message))
        .with_state(handlers)
}
