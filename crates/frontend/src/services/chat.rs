//! Message thread service

use super::{StateCell, ServiceState, error_message};
use counsel_http::client::CounselClient;
use counsel_http::client::chat::DEFAULT_RETRIEVAL_K;
use counsel_http::types::{ChatMessage, ChatRequest, Role, Source};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// One rendered transcript entry
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub role: Role,
    pub content: String,
    pub sources: Vec<Source>,
}

/// The user/assistant pair appended by a successful send
#[derive(Debug, Clone, PartialEq)]
pub struct MessageExchange {
    pub user: ChatEntry,
    pub assistant: ChatEntry,
}

/// Message history and send operations for one conversation view
///
/// Owns the transcript shown to the user. A failed send records an error
/// and leaves the transcript untouched.
pub struct ChatService {
    client: Arc<CounselClient>,
    state: StateCell,
    transcript: Mutex<Vec<ChatEntry>>,
}

impl ChatService {
    pub fn new(client: Arc<CounselClient>) -> Self {
        Self {
            client,
            state: StateCell::new(),
            transcript: Mutex::new(Vec::new()),
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

    /// The transcript as currently displayed
    pub fn transcript(&self) -> Vec<ChatEntry> {
        self.transcript.lock().expect("transcript lock poisoned").clone()
    }

    /// Send a message and append the resulting exchange to the transcript
    ///
    /// Blank input is rejected before any network call.
    pub async fn send(&self, text: &str, conversation_id: i64) -> Option<MessageExchange> {
        let text = text.trim();
        if text.is_empty() {
            self.state.fail("Message must not be empty".to_string());
            return None;
        }

        self.state.begin();
        let request = ChatRequest {
            message: text.to_string(),
            conversation_id,
            k: DEFAULT_RETRIEVAL_K,
        };
        match self.client.send_chat(request).await {
            Ok(reply) => {
                let exchange = MessageExchange {
                    user: ChatEntry {
                        role: Role::User,
                        content: reply.question,
                        sources: Vec::new(),
                    },
                    assistant: ChatEntry {
                        role: Role::Assistant,
                        content: reply.answer,
                        sources: reply.sources,
                    },
                };

                let mut transcript =
                    self.transcript.lock().expect("transcript lock poisoned");
                transcript.push(exchange.user.clone());
                transcript.push(exchange.assistant.clone());
                drop(transcript);

                self.state.finish();
                Some(exchange)
            }
            Err(error) => {
                self.state
                    .fail(error_message(&error, "Could not send the message"));
                None
            }
        }
    }

    /// Replace the transcript with a conversation's stored history
    ///
    /// Returns an empty list on failure; the previous transcript is kept.
    pub async fn history(&self, conversation_id: i64) -> Vec<ChatEntry> {
        self.state.begin();
        match self.client.conversation(conversation_id).await {
            Ok(detail) => {
                let entries: Vec<ChatEntry> =
                    detail.messages.into_iter().map(entry_from).collect();
                *self.transcript.lock().expect("transcript lock poisoned") = entries.clone();
                self.state.finish();
                entries
            }
            Err(error) => {
                self.state
                    .fail(error_message(&error, "Could not load chat history"));
                Vec::new()
            }
        }
    }
}

fn entry_from(message: ChatMessage) -> ChatEntry {
    ChatEntry {
        role: message.role,
        content: message.content,
        sources: message.meta.map(|meta| meta.sources).unwrap_or_default(),
    }
}
