use access_auth_sdk::AccessAuthError;
use thiserror::Error;

/// Domain-specific errors for the access-auth service.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("subscriber not found")]
    SubscriberNotFound,

    #[error("subscription does not grant access")]
    NoActiveSubscription,

    #[error("invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("code delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(e)
    }
}

impl From<DomainError> for AccessAuthError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::SubscriberNotFound => Self::not_found(),
            DomainError::NoActiveSubscription => Self::no_active_subscription(),
            DomainError::InvalidOrExpiredCode => Self::invalid_or_expired_code(),
            DomainError::DeliveryFailed(_) => Self::delivery_failed(),
            DomainError::Validation(message) => Self::invalid_input(message),
            DomainError::Storage(ref source) => {
                tracing::error!(error = ?source, "access-auth storage failure");
                Self::internal()
            }
        }
    }
}
