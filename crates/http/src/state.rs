//! Demo application state
//!
//! Process-local session storage behind the demo routes. Everything here is
//! reset on restart; the production backend owns the durable data.

use crate::bot;
use crate::types::{DemoMessage, DemoSession, Sender};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Id of the session seeded at startup
pub const DEFAULT_SESSION_ID: &str = "default-session";

const WELCOME_TEXT: &str = "Hello! I'm your assistant. Ask me anything you'd like to know!";
const NEW_SESSION_TITLE: &str = "New chat";
const TITLE_MAX_CHARS: usize = 30;

struct SessionEntry {
    session: DemoSession,
    messages: Vec<DemoMessage>,
}

/// Shared in-memory demo state
#[derive(Clone)]
pub struct DemoState {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl Default for DemoState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl DemoState {
    /// Create state seeded with the default session and its welcome message
    pub fn seeded() -> Self {
        let state = Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        };
        state
            .sessions
            .lock()
            .expect("demo state lock poisoned")
            .insert(
                DEFAULT_SESSION_ID.to_string(),
                new_entry(DEFAULT_SESSION_ID.to_string()),
            );
        state
    }

    /// All sessions, most recently updated first
    pub fn list_sessions(&self) -> Vec<DemoSession> {
        let sessions = self.sessions.lock().expect("demo state lock poisoned");
        let mut listed: Vec<DemoSession> = sessions
            .values()
            .map(|entry| entry.session.clone())
            .collect();
        listed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        listed
    }

    /// Create a session with a server-assigned id and a welcome message
    pub fn create_session(&self) -> DemoSession {
        let id = format!("session-{}", Uuid::new_v4());
        let entry = new_entry(id.clone());
        let session = entry.session.clone();
        self.sessions
            .lock()
            .expect("demo state lock poisoned")
            .insert(id, entry);
        session
    }

    /// Remove a session; false when the id is unknown
    pub fn delete_session(&self, id: &str) -> bool {
        self.sessions
            .lock()
            .expect("demo state lock poisoned")
            .remove(id)
            .is_some()
    }

    /// Message history of a session
    pub fn messages(&self, id: &str) -> Option<Vec<DemoMessage>> {
        self.sessions
            .lock()
            .expect("demo state lock poisoned")
            .get(id)
            .map(|entry| entry.messages.clone())
    }

    /// Append a user message and the bot's reply to a session
    ///
    /// Returns `None` for an unknown session. The session's title is set
    /// from the first user message, truncated for display.
    pub fn append_exchange(&self, id: &str, text: &str) -> Option<(DemoMessage, DemoMessage)> {
        let mut sessions = self.sessions.lock().expect("demo state lock poisoned");
        let entry = sessions.get_mut(id)?;

        let text = text.trim();
        let user_message = DemoMessage {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender: Sender::User,
            timestamp: Utc::now(),
        };
        let bot_message = DemoMessage {
            id: Uuid::new_v4().to_string(),
            text: bot::reply(text),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        };

        entry.messages.push(user_message.clone());
        entry.messages.push(bot_message.clone());
        entry.session.updated_at = Utc::now();
        entry.session.message_count = entry.messages.len();

        // Welcome + first user message + first reply
        if entry.session.message_count == 3 {
            entry.session.title = truncate_title(text);
        }

        Some((user_message, bot_message))
    }
}

fn new_entry(id: String) -> SessionEntry {
    let now = Utc::now();
    SessionEntry {
        session: DemoSession {
            id,
            title: NEW_SESSION_TITLE.to_string(),
            created_at: now,
            updated_at: now,
            message_count: 1,
        },
        messages: vec![DemoMessage {
            id: "0".to_string(),
            text: WELCOME_TEXT.to_string(),
            sender: Sender::Bot,
            timestamp: now,
        }],
    }
}

fn truncate_title(text: &str) -> String {
    let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().count() > TITLE_MAX_CHARS {
        format!("{truncated}...")
    } else {
        truncated
    }
}
