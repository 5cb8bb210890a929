//! HTTP handler for the chat endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{json_rejection, ApiError};
use crate::application::handlers::chat::{SubmitChatMessageCommand, SubmitChatMessageHandler};
use crate::domain::foundation::UserId;

use super::dto::{ChatRequest, ChatResponse};

#[derive(Clone)]
pub struct ChatHandlers {
    submit_handler: Arc<SubmitChatMessageHandler>,
}

impl ChatHandlers {
    pub fn new(submit_handler: Arc<SubmitChatMessageHandler>) -> Self {
        Self { submit_handler }
    }
}

/// POST /api/chat - Ask the assistant a question
pub async fn submit_chat_message(
    State(handlers): State<ChatHandlers>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    // A blank user id is treated as anonymous
    let cmd = SubmitChatMessageCommand {
        message: req.message,
        context: req.context,
        user_id: req.user_id.and_then(|id| UserId::new(id).ok()),
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: result.response,
            }),
        )
            .into_response(),
        Err(failure) => ApiError(failure).into_response(),
    }
}
