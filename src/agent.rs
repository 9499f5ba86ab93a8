//! LLM agent module.
//!
//! Talks to a local Ollama server through its `/api/chat` endpoint.

use crate::prompt::Message;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("no Ollama server reachable at {host} (start it with `ollama serve`)")]
    Unreachable {
        host: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("model '{0}' is not available (pull it with `ollama pull {0}`)")]
    ModelNotFound(String),
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("failed to parse response: {0}")]
    ParseError(String),
}

/// A chat-style language model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `messages` to `model` and return the reply text
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<String, AgentError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Ollama client for local model inference.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(host: &str) -> Result<Self, AgentError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AgentError::RequestFailed(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_host(host),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<String, AgentError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            model,
            messages,
            stream: false,
        };

        tracing::info!(model, messages = messages.len(), "calling model");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| AgentError::Unreachable {
                host: self.base_url.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(AgentError::ModelNotFound(model.to_string()));
        }
        if !status.is_success() {
            return Err(AgentError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_message(&text)
            )));
        }

        let reply: ChatResponse =
            serde_json::from_str(&text).map_err(|e| AgentError::ParseError(format!("{e}: {text}")))?;
        tracing::debug!(chars = reply.message.content.len(), "model replied");
        Ok(reply.message.content)
    }
}

/// Accept `host:port` the way the Ollama CLI does and drop trailing slashes
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

/// Pull the `error` field out of an Ollama error body, if it has one
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
