//! Outbound ports of the access-auth domain.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

/// Delivers a code to its owner.
#[async_trait]
pub trait CodeMailer: Send + Sync {
    async fn send_code(&self, to: &str, code: &str, ttl: TimeDelta) -> anyhow::Result<()>;
}

/// Source of the current time. Expiry decisions go through here.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
