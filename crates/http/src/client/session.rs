//! Authentication session management
//!
//! Owns the authentication state machine and the stored token pair. The
//! request executor observes tokens through the [`TokenSource`] trait so
//! refresh behavior can be substituted in tests.

use super::error::ClientError;
use super::expiry::is_expired;
use super::tokens::{TokenPair, TokenStore};
use crate::types::{AuthErrorResponse, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

const TOKEN_PATH: &str = "/api/auth/token/";
const TOKEN_REFRESH_PATH: &str = "/api/auth/token/refresh/";

const LOGIN_FAILED: &str = "Login failed";
const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Loading,
    Authenticated,
}

/// Observable authentication snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub state: AuthState,
    pub error: Option<String>,
}

/// Source of bearer tokens for the request executor
///
/// `refresh` is invoked at most once per executed request, after a 401.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// The currently stored access token, without expiry checks
    fn access_token(&self) -> Option<String>;

    /// Exchange the stored refresh token for a new access token
    async fn refresh(&self) -> Result<(), ClientError>;
}

/// Authentication session manager
///
/// State machine: login success moves to `Authenticated`; logout and
/// refresh failure move to `Unauthenticated`. [`SessionManager::initialize`]
/// resolves the initial `Loading` state from storage and must complete
/// before anything that depends on auth state runs.
pub struct SessionManager {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<AuthSnapshot>,
    refresh_gate: Mutex<()>,
}

impl SessionManager {
    /// Create a session manager over the given token store
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(super::USER_AGENT)
            .build()?;
        let (state, _) = watch::channel(AuthSnapshot {
            state: AuthState::Loading,
            error: None,
        });

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            state,
            refresh_gate: Mutex::new(()),
        })
    }

    /// Current authentication snapshot
    pub fn state(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribe to authentication state changes
    ///
    /// Refresh exhaustion flips the channel to `Unauthenticated` with a
    /// session-expired message; a UI watching this channel routes back to
    /// its login surface no matter which call triggered the expiry.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Resolve authentication state from storage
    ///
    /// Absent tokens leave the session unauthenticated. A stored pair with
    /// an unexpired access token authenticates directly; an expired one
    /// triggers a single silent refresh attempt.
    pub async fn initialize(&self) -> AuthState {
        match self.store.get() {
            None => self.set_state(AuthState::Unauthenticated, None),
            Some(pair) if !is_expired(&pair.access) => {
                self.set_state(AuthState::Authenticated, None);
            }
            Some(_) => {
                if self.refresh().await.is_err() {
                    self.set_state(AuthState::Unauthenticated, None);
                }
            }
        }
        self.state().state
    }

    /// Exchange credentials for a token pair
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        if username.trim().is_empty() || password.is_empty() {
            let message = "Username and password are required".to_string();
            self.set_state(AuthState::Unauthenticated, Some(message.clone()));
            return Err(ClientError::Validation(message));
        }

        self.set_state(AuthState::Loading, None);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = match self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.set_state(AuthState::Unauthenticated, Some(e.to_string()));
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            let body: AuthErrorResponse = response.json().await.unwrap_or_default();
            let message = body
                .detail
                .or(body.message)
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            self.set_state(AuthState::Unauthenticated, Some(message.clone()));
            return Err(ClientError::AuthenticationFailed(message));
        }

        let tokens: LoginResponse = response.json().await?;
        self.store.save(&TokenPair {
            access: tokens.access,
            refresh: tokens.refresh,
        });
        self.set_state(AuthState::Authenticated, None);
        tracing::debug!("Login succeeded");
        Ok(())
    }

    /// Exchange the stored refresh token for a new access token
    ///
    /// Fails without a network call when nothing is stored. Failure clears
    /// the stored pair outright: the refresh token is single-use-forever
    /// from the client's perspective, there is nothing to retry with.
    /// Success keeps the same refresh token and replaces only the access
    /// token.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let Some(before) = self.store.get() else {
            return Err(ClientError::NoCredentials);
        };

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have finished a refresh while we waited.
        let current = match self.store.get() {
            Some(current) if current.access != before.access => return Ok(()),
            Some(current) => current,
            None => return Err(ClientError::NoCredentials),
        };

        let response = match self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_REFRESH_PATH))
            .json(&RefreshRequest {
                refresh: current.refresh.clone(),
            })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.expire_session();
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Token refresh rejected");
            self.expire_session();
            return Err(ClientError::AuthenticationFailed(SESSION_EXPIRED.to_string()));
        }

        let refreshed: RefreshResponse = response.json().await?;
        self.store.save(&TokenPair {
            access: refreshed.access,
            refresh: current.refresh,
        });
        self.set_state(AuthState::Authenticated, None);
        tracing::debug!("Access token refreshed");
        Ok(())
    }

    /// Clear the session
    ///
    /// Callable at any time; never fails.
    pub fn logout(&self) {
        self.store.clear();
        self.set_state(AuthState::Unauthenticated, None);
    }

    /// The stored access token, if a pair is present
    ///
    /// Does not check expiry or trigger refresh; the executor decides when
    /// a refresh is warranted.
    pub fn access_token(&self) -> Option<String> {
        self.store.get().map(|pair| pair.access)
    }

    fn expire_session(&self) {
        self.store.clear();
        self.set_state(AuthState::Unauthenticated, Some(SESSION_EXPIRED.to_string()));
    }

    fn set_state(&self, state: AuthState, error: Option<String>) {
        self.state.send_replace(AuthSnapshot { state, error });
    }
}

#[async_trait]
impl TokenSource for SessionManager {
    fn access_token(&self) -> Option<String> {
        SessionManager::access_token(self)
    }

    async fn refresh(&self) -> Result<(), ClientError> {
        SessionManager::refresh(self).await
    }
}
