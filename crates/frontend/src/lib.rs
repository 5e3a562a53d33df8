//! Common frontend services and configuration for Counsel
//!
//! The services here are the layer a UI binds to: each wraps the typed API
//! client, never lets an error escape, and exposes its loading/error state
//! through a watch channel the UI can observe.

pub mod config;
pub mod services;

pub use config::ApiConfig;
pub use services::chat::{ChatEntry, ChatService, MessageExchange};
pub use services::conversations::ConversationsService;
pub use services::ServiceState;
