//! Authenticated request execution with one-shot token refresh
//!
//! Every authenticated call follows the same path: attach the stored
//! access token as a bearer header, send, and on a 401 perform exactly one
//! refresh followed by exactly one retry. The retried response is returned
//! as-is; a second 401 is the caller's problem, never a second refresh.

use super::CounselClient;
use super::error::ClientError;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, Response, StatusCode};

impl CounselClient {
    /// Send a request with bearer authentication
    ///
    /// Fails with [`ClientError::NoCredentials`] before anything is sent
    /// when no token pair is stored. Responses other than 401 are returned
    /// unmodified; interpreting business-level success is the caller's
    /// responsibility. Transport failures propagate.
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
        let request = request.build()?;
        // Bodies that cannot be cloned (streams) forfeit the retry; the
        // original 401 response is returned in that case.
        let retry = request.try_clone();

        let response = self.send_with_bearer(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!("Received 401, attempting token refresh");
        self.token_source()
            .refresh()
            .await
            .map_err(|_| ClientError::AuthenticationFailed("Authentication failed".to_string()))?;

        match retry {
            Some(retry) => self.send_with_bearer(retry).await,
            None => Ok(response),
        }
    }

    async fn send_with_bearer(&self, mut request: Request) -> Result<Response, ClientError> {
        let Some(access) = self.token_source().access_token() else {
            return Err(ClientError::NoCredentials);
        };
        let bearer = HeaderValue::try_from(format!("Bearer {access}"))
            .map_err(|_| ClientError::Configuration("access token is not header-safe".into()))?;
        request.headers_mut().insert(AUTHORIZATION, bearer);

        Ok(self.http().execute(request).await?)
    }

    /// Execute a request and decode a JSON response, mapping error statuses
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Execute a request where only the status matters
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let response = self.send(request).await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}
