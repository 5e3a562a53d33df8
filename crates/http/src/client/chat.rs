//! Retrieval-augmented chat client methods

use super::{ClientError, CounselClient};
use crate::types::{ChatRequest, ChatResponse};

/// Default number of retrieved passages backing an answer
pub const DEFAULT_RETRIEVAL_K: u32 = 5;

impl CounselClient {
    /// Send a message and receive the assistant's answer with sources
    pub async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/chat/chat/")
            .json(&request);
        self.execute(req).await
    }
}
