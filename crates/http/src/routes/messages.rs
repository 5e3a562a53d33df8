//! Demo message endpoints

use crate::{
    error::HttpError,
    state::{DEFAULT_SESSION_ID, DemoState},
    types::{MessageListResponse, SendMessageRequest, SendMessageResponse},
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::instrument;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Session selector; the seeded default session when omitted
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessagesQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Fetch a session's message history
#[utoipa::path(
    get,
    path = "/api/messages",
    params(MessagesQuery),
    responses(
        (status = 200, description = "Message history", body = MessageListResponse),
        (status = 404, description = "Unknown session"),
    ),
    tag = "messages"
)]
#[instrument(name = "demo_list_messages", skip(state))]
pub async fn list_messages(
    State(state): State<DemoState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessageListResponse>, HttpError> {
    let session_id = query
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let messages = state
        .messages(&session_id)
        .ok_or_else(|| HttpError::NotFound("chat session not found".to_string()))?;

    let total = messages.len();
    Ok(Json(MessageListResponse {
        success: true,
        messages,
        total,
    }))
}

/// Send a message and receive the bot's reply
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Exchange appended", body = SendMessageResponse),
        (status = 400, description = "Empty message"),
        (status = 404, description = "Unknown session"),
    ),
    tag = "messages"
)]
#[instrument(name = "demo_send_message", skip(state, request), fields(session_id = ?request.session_id))]
pub async fn send_message(
    State(state): State<DemoState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), HttpError> {
    if request.text.trim().is_empty() {
        return Err(HttpError::BadRequest(
            "message text must not be empty".to_string(),
        ));
    }

    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let (user_message, bot_message) = state
        .append_exchange(&session_id, &request.text)
        .ok_or_else(|| HttpError::NotFound("chat session not found".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            success: true,
            user_message,
            bot_message,
        }),
    ))
}

/// Add message routes
pub fn add_routes(router: OpenApiRouter<DemoState>) -> OpenApiRouter<DemoState> {
    router.routes(routes!(list_messages, send_message))
}
