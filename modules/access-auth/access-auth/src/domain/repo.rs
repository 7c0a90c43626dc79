use access_auth_sdk::Subscriber;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::VerificationCode;

/// Read access to the billing-owned subscriber table.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Subscriber>>;
}

#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert or replace the single code row for `code.email` in one statement.
    async fn upsert(&self, code: &VerificationCode) -> anyhow::Result<()>;

    /// Mark the matching row used if it is unused and unexpired at `now`.
    ///
    /// Must be a single conditional write. Returns whether this call flipped the row.
    async fn consume(&self, email: &str, code: &str, now: DateTime<Utc>) -> anyhow::Result<bool>;
}
