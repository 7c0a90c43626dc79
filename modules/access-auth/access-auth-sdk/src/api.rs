//! `AccessAuthClientV1` trait definition.

use async_trait::async_trait;

use crate::errors::AccessAuthError;
use crate::models::{Subscriber, VerifiedUser};

/// Public API trait for the access-auth module (Version 1).
///
/// E-mail arguments are accepted raw; implementations normalize them.
#[async_trait]
pub trait AccessAuthClientV1: Send + Sync {
    /// Issue a fresh one-time code for an eligible subscriber and e-mail it.
    ///
    /// Replaces any previous code stored for the same address.
    async fn issue_code(&self, email: &str) -> Result<(), AccessAuthError>;

    /// Consume a one-time code. Succeeds at most once per issued code.
    async fn verify_code(&self, email: &str, code: &str) -> Result<VerifiedUser, AccessAuthError>;

    /// Look up the subscription backing an e-mail address.
    async fn check_subscription(&self, email: &str) -> Result<Subscriber, AccessAuthError>;
}
