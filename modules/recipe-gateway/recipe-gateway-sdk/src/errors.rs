//! Error types for the recipe-gateway SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeGatewayError {
    #[error("upstream rate limit reached")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("upstream credits exhausted")]
    QuotaExceeded,

    #[error("upstream request failed")]
    Upstream { status: Option<u16> },

    #[error("upstream returned no content")]
    EmptyResponse,

    #[error("upstream content is not a valid JSON payload")]
    MalformedResponse { raw: String },

    #[error("modified recipe is missing: {}", missing.join(", "))]
    IncompleteRecipe { missing: Vec<String> },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error")]
    Internal,
}

impl RecipeGatewayError {
    #[must_use]
    pub fn rate_limited(retry_after_secs: Option<u64>) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    #[must_use]
    pub fn quota_exceeded() -> Self {
        Self::QuotaExceeded
    }

    #[must_use]
    pub fn upstream(status: Option<u16>) -> Self {
        Self::Upstream { status }
    }

    #[must_use]
    pub fn empty_response() -> Self {
        Self::EmptyResponse
    }

    #[must_use]
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedResponse { raw: raw.into() }
    }

    #[must_use]
    pub fn incomplete(missing: Vec<String>) -> Self {
        Self::IncompleteRecipe { missing }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
