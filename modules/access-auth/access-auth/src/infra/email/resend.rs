//! Code delivery through the Resend transactional e-mail API.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::TimeDelta;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::EmailConfig;
use crate::domain::ports::CodeMailer;

use super::template::render_code_email;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    from: String,
    subject: String,
}

impl ResendMailer {
    /// Build the mailer from validated configuration.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or the HTTP client cannot be built.
    pub fn from_config(cfg: &EmailConfig) -> anyhow::Result<Self> {
        let api_key = cfg
            .api_key
            .as_ref()
            .map(|k| SecretString::from(k.expose_secret().to_owned()))
            .context("access_auth.email.api_key is not configured")?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("failed to build e-mail HTTP client")?;

        Ok(Self {
            client,
            api_url: cfg.api_url.clone(),
            api_key,
            from: cfg.from.clone(),
            subject: cfg.subject.clone(),
        })
    }
}

#[async_trait]
impl CodeMailer for ResendMailer {
    #[instrument(skip_all)]
    async fn send_code(&self, to: &str, code: &str, ttl: TimeDelta) -> anyhow::Result<()> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject: &self.subject,
            html: render_code_email(code, ttl.num_minutes()),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .context("e-mail provider request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("e-mail provider returned {status}: {detail}");
        }

        debug!(%status, "e-mail accepted by provider");
        Ok(())
    }
}
