//! Conversation API client methods

use super::{ClientError, CounselClient};
use crate::types::{Conversation, ConversationDetail, CreateConversationRequest};

impl CounselClient {
    /// List conversations, most recently updated first
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ClientError> {
        let req = self.request(reqwest::Method::GET, "/api/chat/conversations/");
        self.execute(req).await
    }

    /// Create a conversation
    pub async fn create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> Result<Conversation, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/chat/conversations/")
            .json(&request);
        self.execute(req).await
    }

    /// Fetch a conversation with its message history
    pub async fn conversation(&self, id: i64) -> Result<ConversationDetail, ClientError> {
        let req = self.request(
            reqwest::Method::GET,
            &format!("/api/chat/conversations/{id}/"),
        );
        self.execute(req).await
    }

    /// Delete a conversation
    pub async fn delete_conversation(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(
            reqwest::Method::DELETE,
            &format!("/api/chat/conversations/{id}"),
        );
        self.execute_empty(req).await
    }
}
