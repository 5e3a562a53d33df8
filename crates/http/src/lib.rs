//! Counsel HTTP module: wire types shared between the API client and the
//! demo server, plus the client and server implementations behind features.
//!
//! The `client` feature provides a typed client for the assistant backend
//! with bearer authentication and automatic one-shot token refresh. The
//! `server` feature provides the disposable in-memory demo surface.

pub mod error;
pub mod types;

#[cfg(feature = "server")]
pub mod bot;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod state;

#[cfg(feature = "client")]
pub mod client;

pub use error::{HttpError, Result};

#[cfg(feature = "server")]
pub use state::DemoState;
