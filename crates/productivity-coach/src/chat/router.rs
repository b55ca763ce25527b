use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::service::{ChatError, ChatService};
use super::store::{SessionId, SessionStore};

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

/// Router exposing the chat-style questionnaire.
pub fn chat_router<S>(service: Arc<ChatService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/chat/sessions", post(start_handler::<S>))
        .route(
            "/api/v1/chat/sessions/:session_id",
            get(session_handler::<S>).delete(reset_handler::<S>),
        )
        .route(
            "/api/v1/chat/sessions/:session_id/messages",
            post(message_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<S>(State(service): State<Arc<ChatService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<ChatService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn message_handler<S>(
    State(service): State<Arc<ChatService<S>>>,
    Path(session_id): Path<String>,
    Json(request): Json<PostMessageRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.post(&SessionId(session_id), &request.content) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reset_handler<S>(
    State(service): State<Arc<ChatService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.reset(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ChatError) -> Response {
    let status = match &err {
        ChatError::NotFound(_) => StatusCode::NOT_FOUND,
        ChatError::Finished(_) | ChatError::Busy(_) => StatusCode::CONFLICT,
        ChatError::Store(store_error) => {
            error!(error = %store_error, "chat session store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
