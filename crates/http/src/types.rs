//! Common types used by both client and server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Credential exchange request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

/// Access token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Access token refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Error body returned by the token endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Message author on the production backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Retrieval citation attached to an assistant reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub content: String,
    #[serde(default)]
    pub metadata: JsonValue,
}

/// Metadata carried by an assistant message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageMeta {
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One message within a conversation, append-only from the client's view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub meta: Option<MessageMeta>,
    pub created_at: DateTime<Utc>,
}

/// Conversation summary as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_message: Option<String>,
}

/// Conversation with its full message history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Conversation creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
}

/// Retrieval-augmented chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: i64,
    pub k: u32,
}

/// Retrieval-augmented chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

// Demo surface types. The demo API predates the production backend and
// speaks camelCase JSON; it is a process-local stand-in, not the production
// contract.

/// Message author on the demo surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Demo chat session summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DemoSession {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

/// Demo chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DemoMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Demo session list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SessionListResponse {
    pub success: bool,
    pub sessions: Vec<DemoSession>,
    pub total: usize,
}

/// Demo session creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateSessionResponse {
    pub success: bool,
    pub session: DemoSession,
}

/// Demo session deletion response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DeleteSessionResponse {
    pub success: bool,
    pub message: String,
}

/// Demo message history response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MessageListResponse {
    pub success: bool,
    pub messages: Vec<DemoMessage>,
    pub total: usize,
}

/// Demo send-message request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Demo send-message response: the appended user/bot exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub user_message: DemoMessage,
    pub bot_message: DemoMessage,
}
