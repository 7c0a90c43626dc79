//! In-process implementation of `AccessAuthClientV1`.

use std::sync::Arc;

use access_auth_sdk::{AccessAuthClientV1, AccessAuthError, Subscriber, VerifiedUser};
use async_trait::async_trait;

use crate::domain::service::Service;

/// Local client adapter that delegates to the domain service.
pub struct AccessAuthLocalClient {
    service: Arc<Service>,
}

impl AccessAuthLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AccessAuthClientV1 for AccessAuthLocalClient {
    async fn issue_code(&self, email: &str) -> Result<(), AccessAuthError> {
        self.service.issue_code(email).await.map_err(Into::into)
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<VerifiedUser, AccessAuthError> {
        self.service
            .verify_code(email, code)
            .await
            .map_err(Into::into)
    }

    async fn check_subscription(&self, email: &str) -> Result<Subscriber, AccessAuthError> {
        self.service
            .check_subscription(email)
            .await
            .map_err(Into::into)
    }
}
