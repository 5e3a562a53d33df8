//! Feature services backing the UI
//!
//! Services catch every failure and convert it into a human-readable string
//! in their observable state; callers get degraded values (empty lists,
//! `None`, `false`) instead of errors.

pub mod chat;
pub mod conversations;

use counsel_http::client::error::ClientError;
use tokio::sync::watch;

pub use chat::ChatService;
pub use conversations::ConversationsService;

/// Observable loading/error state of a service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceState {
    pub busy: bool,
    pub error: Option<String>,
}

/// Watch-backed state cell shared by the services
pub(crate) struct StateCell {
    tx: watch::Sender<ServiceState>,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(ServiceState::default());
        Self { tx }
    }

    pub(crate) fn snapshot(&self) -> ServiceState {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ServiceState> {
        self.tx.subscribe()
    }

    pub(crate) fn begin(&self) {
        self.tx.send_replace(ServiceState {
            busy: true,
            error: None,
        });
    }

    pub(crate) fn finish(&self) {
        self.tx.send_replace(ServiceState {
            busy: false,
            error: None,
        });
    }

    pub(crate) fn fail(&self, message: String) {
        tracing::warn!("{message}");
        self.tx.send_replace(ServiceState {
            busy: false,
            error: Some(message),
        });
    }
}

/// Error string surfaced to the UI
///
/// Prefers the response body's `error` field when the body is JSON shaped
/// like the backend's envelopes, otherwise the per-operation fallback.
pub(crate) fn error_message(error: &ClientError, fallback: &str) -> String {
    let body = match error {
        ClientError::ServerError { message, .. } => Some(message),
        ClientError::AuthenticationFailed(message)
        | ClientError::NotFound(message)
        | ClientError::BadRequest(message)
        | ClientError::Forbidden(message) => Some(message),
        _ => None,
    };

    if let Some(raw) = body {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
            if let Some(text) = value.get("error").and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }

    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_body_error_field() {
        let error = ClientError::ServerError {
            status: 500,
            message: r#"{"success": false, "error": "storage offline"}"#.to_string(),
        };
        assert_eq!(error_message(&error, "fallback"), "storage offline");
    }

    #[test]
    fn test_error_message_falls_back_for_plain_bodies() {
        let error = ClientError::NotFound("plain text".to_string());
        assert_eq!(error_message(&error, "fallback"), "fallback");
    }

    #[test]
    fn test_error_message_falls_back_for_no_credentials() {
        assert_eq!(
            error_message(&ClientError::NoCredentials, "fallback"),
            "fallback"
        );
    }
}
