use recipe_gateway_sdk::RecipeGatewayError;
use thiserror::Error;

/// Domain-specific errors for the recipe gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("upstream rate limited the request")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("upstream credits exhausted")]
    QuotaExceeded,

    #[error("upstream failure: {detail}")]
    Upstream { status: Option<u16>, detail: String },

    #[error("upstream returned no content")]
    EmptyResponse,

    #[error("malformed model output: {reason}")]
    MalformedResponse { raw: String, reason: String },

    #[error("modified recipe lacks {}", missing.join(", "))]
    IncompleteRecipe { missing: Vec<String> },

    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }

    pub fn malformed(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Category of an upstream rejection for image analysis.
    pub fn from_rejection(status: u16, retry_after_secs: Option<u64>, detail: &str) -> Self {
        match status {
            429 => Self::RateLimited { retry_after_secs },
            402 => Self::QuotaExceeded,
            _ => Self::upstream(Some(status), detail),
        }
    }
}

impl From<DomainError> for RecipeGatewayError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::RateLimited { retry_after_secs } => Self::rate_limited(retry_after_secs),
            DomainError::QuotaExceeded => Self::quota_exceeded(),
            DomainError::Upstream { status, .. } => Self::upstream(status),
            DomainError::EmptyResponse => Self::empty_response(),
            DomainError::MalformedResponse { raw, .. } => Self::malformed(raw),
            DomainError::IncompleteRecipe { missing } => Self::incomplete(missing),
            DomainError::Validation(message) => Self::invalid_input(message),
        }
    }
}
