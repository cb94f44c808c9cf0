use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use triage_core::EngineError;

/// A chat message for the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Send a chat completion request and return the assistant's response text.
    /// Unset sampling options are left out of the request.
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Longest upstream body carried into an [`EngineError`].
const MAX_ERROR_BODY: usize = 200;

impl From<LlmError> for EngineError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ApiError { status: 429, .. } => EngineError::RateLimited,
            LlmError::ApiError { status: 402, .. } => EngineError::QuotaExhausted,
            LlmError::ApiError { status, body } => EngineError::Upstream {
                status,
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            },
            LlmError::HttpError(e) if e.is_timeout() => {
                EngineError::Transport("request timed out".into())
            }
            LlmError::HttpError(e) => EngineError::Transport(e.to_string()),
            LlmError::ParseError(msg) => EngineError::MalformedResponse(msg),
            LlmError::NotConfigured(msg) => EngineError::NotConfigured(msg),
        }
    }
}
