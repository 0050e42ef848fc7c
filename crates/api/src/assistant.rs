//! Proxy to the external conversational service.
//!
//! The upstream contract is `POST {base_url}/chat` with `{"message": ...}`
//! answering `{"response": ...}`. Any failure (connection, timeout, non-2xx
//! status, undecodable body) surfaces as [`AssistantError`]; the handler
//! turns it into a 503 carrying [`FALLBACK_RESPONSE`].

use std::time::Duration;

use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

/// Text returned to the caller whenever the upstream cannot answer.
pub const FALLBACK_RESPONSE: &str = "Service IA temporairement indisponible. Veuillez réessayer.";

/// Where the upstream lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The underlying HTTP request failed (network, DNS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status code.
    #[error("Assistant returned HTTP {0}")]
    HttpStatus(u16),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

pub struct AssistantClient {
    client: reqwest::Client,
    chat_url: String,
}

impl AssistantClient {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            chat_url: format!("{}/chat", config.base_url.trim_end_matches('/')),
        })
    }

    /// Forward `message`, with the caller's `Authorization` header, and
    /// return the upstream's answer.
    pub async fn chat(&self, message: &str, authorization: &str) -> Result<String, AssistantError> {
        let response = self
            .client
            .post(&self.chat_url)
            .header(AUTHORIZATION, authorization)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::HttpStatus(status.as_u16()));
        }

        let reply: ChatReply = response.json().await?;
        Ok(reply.response)
    }
}
