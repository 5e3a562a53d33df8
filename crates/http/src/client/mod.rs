//! Counsel API client

pub mod chat;
pub mod conversations;
pub mod error;
pub mod executor;
pub mod expiry;
pub mod session;
pub mod tokens;

use error::ClientError;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

pub use session::{AuthSnapshot, AuthState, SessionManager, TokenSource};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};

pub(crate) const USER_AGENT: &str = "counsel-client/0.1.0";

/// Counsel API client
///
/// Every request goes through the authenticated executor in
/// [`executor`]: bearer attachment, 401 detection, one refresh-and-retry.
#[derive(Clone)]
pub struct CounselClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl CounselClient {
    /// Create a new client with default configuration
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).token_source(tokens).build()
    }

    /// Create a new client builder
    pub fn builder() -> CounselClientBuilder {
        CounselClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for an API path
    ///
    /// The bearer header is attached at send time by the executor, so the
    /// retry after a refresh picks up the replaced access token.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, url)
    }

    pub(crate) fn token_source(&self) -> &Arc<dyn TokenSource> {
        &self.tokens
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

/// Builder for CounselClient
#[derive(Default)]
pub struct CounselClientBuilder {
    base_url: Option<String>,
    tokens: Option<Arc<dyn TokenSource>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CounselClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the token source used for authentication
    pub fn token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CounselClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let tokens = self
            .tokens
            .ok_or_else(|| ClientError::Configuration("token_source is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent(USER_AGENT);
        }

        let http = client_builder.build()?;

        Ok(CounselClient {
            http,
            base_url,
            tokens,
        })
    }
}
