use std::sync::Arc;

use access_auth_sdk::{Subscriber, VerifiedUser, normalize_email};
use chrono::TimeDelta;
use tracing::{debug, info, instrument, warn};

use super::email::{mask_email, parse_email};
use super::error::DomainError;
use super::model::{VerificationCode, is_well_formed_code};
use super::ports::{Clock, CodeMailer};
use super::repo::{SubscriberRepository, VerificationCodeRepository};

// ============================================================================
// Service Configuration
// ============================================================================

pub struct ServiceConfig {
    pub code_ttl: TimeDelta,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl: TimeDelta::minutes(10),
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Outbound collaborators of the service.
pub struct ServiceDeps {
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub codes: Arc<dyn VerificationCodeRepository>,
    pub mailer: Arc<dyn CodeMailer>,
    pub clock: Arc<dyn Clock>,
}

pub struct Service {
    subscribers: Arc<dyn SubscriberRepository>,
    codes: Arc<dyn VerificationCodeRepository>,
    mailer: Arc<dyn CodeMailer>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(deps: ServiceDeps, config: ServiceConfig) -> Self {
        Self {
            subscribers: deps.subscribers,
            codes: deps.codes,
            mailer: deps.mailer,
            clock: deps.clock,
            config,
        }
    }

    /// Issue and deliver a new code.
    ///
    /// The code row is written before delivery and is kept when delivery fails.
    #[instrument(skip_all, fields(email = %mask_email(&normalize_email(raw_email))))]
    pub async fn issue_code(&self, raw_email: &str) -> Result<(), DomainError> {
        let email = parse_email(raw_email)?;

        let subscriber = self.eligible_subscriber(&email).await?;

        let record = VerificationCode::issue(subscriber.email, self.clock.now(), self.config.code_ttl);
        self.codes.upsert(&record).await?;
        debug!(expires_at = %record.expires_at, "verification code stored");

        if let Err(e) = self
            .mailer
            .send_code(&record.email, &record.code, self.config.code_ttl)
            .await
        {
            warn!(error = %e, "verification code stored but delivery failed");
            return Err(DomainError::DeliveryFailed(e.to_string()));
        }

        info!("verification code issued");
        Ok(())
    }

    /// Consume a code. Wrong, used and expired codes are indistinguishable.
    #[instrument(skip_all, fields(email = %mask_email(&normalize_email(raw_email))))]
    pub async fn verify_code(&self, raw_email: &str, code: &str) -> Result<VerifiedUser, DomainError> {
        let email = normalize_email(raw_email);
        let code = code.trim();
        if email.is_empty() || code.is_empty() {
            return Err(DomainError::validation("Email e código são obrigatórios"));
        }

        if !is_well_formed_code(code) {
            debug!("rejecting malformed code");
            return Err(DomainError::InvalidOrExpiredCode);
        }

        let now = self.clock.now();
        if !self.codes.consume(&email, code, now).await? {
            info!("verification rejected");
            return Err(DomainError::InvalidOrExpiredCode);
        }

        let subscriber = self
            .subscribers
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::SubscriberNotFound)?;

        let user = VerifiedUser::from(subscriber);
        info!(plan = %user.plan, has_access = user.has_access, "verification code consumed");
        Ok(user)
    }

    /// Current subscription for an address.
    #[instrument(skip_all, fields(email = %mask_email(&normalize_email(raw_email))))]
    pub async fn check_subscription(&self, raw_email: &str) -> Result<Subscriber, DomainError> {
        let email = parse_email(raw_email)?;
        self.subscribers
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::SubscriberNotFound)
    }

    async fn eligible_subscriber(&self, email: &str) -> Result<Subscriber, DomainError> {
        let Some(subscriber) = self.subscribers.find_by_email(email).await? else {
            debug!("no subscriber for address");
            return Err(DomainError::SubscriberNotFound);
        };

        if !subscriber.has_access() {
            debug!(plan = %subscriber.plan, status = %subscriber.status, "subscription does not grant access");
            return Err(DomainError::NoActiveSubscription);
        }

        Ok(subscriber)
    }
}
