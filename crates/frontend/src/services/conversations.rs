//! Conversation list service

use super::{StateCell, ServiceState, error_message};
use counsel_http::client::CounselClient;
use counsel_http::types::{Conversation, CreateConversationRequest};
use std::sync::Arc;
use tokio::sync::watch;

/// Conversation list/create/delete operations for the UI
pub struct ConversationsService {
    client: Arc<CounselClient>,
    state: StateCell,
}

impl ConversationsService {
    pub fn new(client: Arc<CounselClient>) -> Self {
        Self {
            client,
            state: StateCell::new(),
        }
    }

    /// Current loading/error state
    pub fn state(&self) -> ServiceState {
        self.state.snapshot()
    }

    /// Subscribe to loading/error state changes
    pub fn subscribe(&self) -> watch::Receiver<ServiceState> {
        self.state.subscribe()
    }

    /// Fetch all conversations, most recently updated first
    ///
    /// Returns an empty list on failure; the error is recorded in state.
    pub async fn list(&self) -> Vec<Conversation> {
        self.state.begin();
        match self.client.list_conversations().await {
            Ok(conversations) => {
                self.state.finish();
                conversations
            }
            Err(error) => {
                self.state
                    .fail(error_message(&error, "Could not load chat sessions"));
                Vec::new()
            }
        }
    }

    /// Create a conversation with the given title
    pub async fn create(&self, title: &str) -> Option<Conversation> {
        self.state.begin();
        let request = CreateConversationRequest {
            title: title.to_string(),
            is_archived: false,
        };
        match self.client.create_conversation(request).await {
            Ok(conversation) => {
                self.state.finish();
                Some(conversation)
            }
            Err(error) => {
                self.state
                    .fail(error_message(&error, "Could not create a chat session"));
                None
            }
        }
    }

    /// Delete a conversation; false on failure
    pub async fn delete(&self, id: i64) -> bool {
        self.state.begin();
        match self.client.delete_conversation(id).await {
            Ok(()) => {
                self.state.finish();
                true
            }
            Err(error) => {
                self.state
                    .fail(error_message(&error, "Could not delete the chat session"));
                false
            }
        }
    }
}
