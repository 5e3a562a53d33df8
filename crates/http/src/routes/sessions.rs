//! Demo chat session endpoints

use crate::{
    error::HttpError,
    state::DemoState,
    types::{CreateSessionResponse, DeleteSessionResponse, SessionListResponse},
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa_axum::{router::OpenApiRouter, routes};

/// Session selector passed in the query string
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// Id of the session to operate on
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// List all chat sessions
#[utoipa::path(
    get,
    path = "/api/chat-sessions",
    responses(
        (status = 200, description = "Session list", body = SessionListResponse),
    ),
    tag = "chat-sessions"
)]
#[instrument(name = "demo_list_sessions", skip(state))]
pub async fn list_sessions(State(state): State<DemoState>) -> Json<SessionListResponse> {
    let sessions = state.list_sessions();
    let total = sessions.len();
    Json(SessionListResponse {
        success: true,
        sessions,
        total,
    })
}

/// Create a new chat session
#[utoipa::path(
    post,
    path = "/api/chat-sessions",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
    ),
    tag = "chat-sessions"
)]
#[instrument(name = "demo_create_session", skip(state))]
pub async fn create_session(
    State(state): State<DemoState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session = state.create_session();
    info!("Created chat session {}", session.id);
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            success: true,
            session,
        }),
    )
}

/// Delete a chat session
#[utoipa::path(
    delete,
    path = "/api/chat-sessions",
    params(SessionQuery),
    responses(
        (status = 200, description = "Session deleted", body = DeleteSessionResponse),
        (status = 400, description = "Missing session id"),
        (status = 404, description = "Unknown session"),
    ),
    tag = "chat-sessions"
)]
#[instrument(name = "demo_delete_session", skip(state))]
pub async fn delete_session(
    State(state): State<DemoState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<DeleteSessionResponse>, HttpError> {
    let session_id = query
        .session_id
        .ok_or_else(|| HttpError::BadRequest("missing chat session id".to_string()))?;

    if !state.delete_session(&session_id) {
        return Err(HttpError::NotFound("chat session not found".to_string()));
    }

    info!("Deleted chat session {}", session_id);
    Ok(Json(DeleteSessionResponse {
        success: true,
        message: "Chat session deleted".to_string(),
    }))
}

/// Add session routes
pub fn add_routes(router: OpenApiRouter<DemoState>) -> OpenApiRouter<DemoState> {
    router.routes(routes!(list_sessions, create_session, delete_session))
}
