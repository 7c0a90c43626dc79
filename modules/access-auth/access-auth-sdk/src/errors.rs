//! Error types for the access-auth SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessAuthError {
    #[error("no subscriber registered for this e-mail")]
    NotFound,

    #[error("subscription does not grant access")]
    NoActiveSubscription,

    #[error("invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("verification e-mail could not be delivered")]
    DeliveryFailed,

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error")]
    Internal,
}

impl AccessAuthError {
    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound
    }

    #[must_use]
    pub fn no_active_subscription() -> Self {
        Self::NoActiveSubscription
    }

    #[must_use]
    pub fn invalid_or_expired_code() -> Self {
        Self::InvalidOrExpiredCode
    }

    #[must_use]
    pub fn delivery_failed() -> Self {
        Self::DeliveryFailed
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
