use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use http::header::RETRY_AFTER;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::RecipeGatewayConfig;
use crate::domain::ports::{ChatCompletionPort, ChatReply, ChatRequest, TransportError};

use super::wire::{CompletionRequest, CompletionResponse};

/// Chat-completion client for an OpenAI-compatible gateway.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    model: String,
}

impl OpenAiChatClient {
    /// # Errors
    /// Returns an error if the API key is missing or the HTTP client cannot be built.
    pub fn from_config(cfg: &RecipeGatewayConfig) -> anyhow::Result<Self> {
        let api_key = cfg
            .api_key
            .as_ref()
            .map(|k| SecretString::from(k.expose_secret().to_owned()))
            .context("recipe_gateway.api_key is not configured")?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            client,
            api_url: cfg.api_url.clone(),
            api_key,
            model: cfg.model.clone(),
        })
    }
}

#[async_trait]
impl ChatCompletionPort for OpenAiChatClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, TransportError> {
        let body = CompletionRequest::new(&self.model, &request);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response.text().await.map_err(map_transport_error)?;
        debug!(%status, bytes = text.len(), "upstream answered");

        if !status.is_success() {
            return Ok(ChatReply::Rejected {
                status: status.as_u16(),
                retry_after_secs,
                body: text,
            });
        }

        match serde_json::from_str::<CompletionResponse>(&text) {
            Ok(envelope) => Ok(ChatReply::Completed {
                content: envelope.into_text(),
            }),
            Err(e) => {
                debug!(error = %e, "response is not a chat-completion envelope");
                Ok(ChatReply::Unreadable { body: text })
            }
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn map_transport_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
