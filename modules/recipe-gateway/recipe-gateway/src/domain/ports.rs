//! Outbound port to the chat-completion endpoint.

use async_trait::async_trait;
use thiserror::Error;

/// One chat turn: optional system prompt plus a user message that may carry an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub user_text: String,
    pub image_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// What the endpoint answered, before any interpretation of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// 2xx with a well-formed envelope. `content` is the assistant text, if any.
    Completed { content: Option<String> },
    /// 2xx whose body is not a chat-completion envelope.
    Unreadable { body: String },
    /// Non-2xx.
    Rejected {
        status: u16,
        retry_after_secs: Option<u64>,
        body: String,
    },
}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("could not connect to upstream: {0}")]
    Connect(String),
    #[error("upstream request failed: {0}")]
    Other(String),
}

#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, TransportError>;
}
