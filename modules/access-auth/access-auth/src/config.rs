use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use access_auth_sdk::{Plan, SubscriptionStatus};

/// Configuration for the access-auth module.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessAuthConfig {
    /// Lifetime of an issued code.
    pub code_ttl_secs: u64,
    pub email: EmailConfig,
    /// Subscribers upserted at startup. Meant for local and mock runs; billing owns the
    /// table in production.
    pub seed_subscribers: Vec<SeedSubscriber>,
}

impl Default for AccessAuthConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: 600,
            email: EmailConfig::default(),
            seed_subscribers: Vec::new(),
        }
    }
}

/// Transactional e-mail (Resend) settings.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailConfig {
    pub api_url: String,
    #[serde(
        deserialize_with = "secret::deserialize",
        serialize_with = "secret::serialize_redacted"
    )]
    pub api_key: Option<SecretString>,
    pub from: String,
    pub subject: String,
    pub timeout_ms: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_owned(),
            api_key: None,
            from: "ChefAI <noreply@resend.dev>".to_owned(),
            subject: "Seu código de acesso ChefAI".to_owned(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedSubscriber {
    pub email: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
}

impl AccessAuthConfig {
    /// Reject settings the module cannot start with.
    ///
    /// # Errors
    /// Returns an error naming the first offending key.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.code_ttl_secs == 0 {
            anyhow::bail!("access_auth.code_ttl_secs must be greater than zero");
        }
        if i64::try_from(self.code_ttl_secs).is_err() {
            anyhow::bail!("access_auth.code_ttl_secs is out of range");
        }
        let has_key = self
            .email
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty());
        if !has_key {
            anyhow::bail!("access_auth.email.api_key is required (or set RESEND_API_KEY)");
        }
        url::Url::parse(&self.email.api_url).map_err(|e| {
            anyhow::anyhow!("access_auth.email.api_url '{}' is invalid: {e}", self.email.api_url)
        })?;
        if self.email.from.trim().is_empty() {
            anyhow::bail!("access_auth.email.from must not be empty");
        }
        Ok(())
    }
}

/// Serde helpers for optional API keys.
pub mod secret {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Deserialize an optional string into a secret.
    ///
    /// # Errors
    /// Propagates the deserializer's error.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(SecretString::from))
    }

    /// Never writes the secret itself.
    ///
    /// # Errors
    /// Propagates the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize_redacted<S>(value: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(_) => serializer.serialize_some("[REDACTED]"),
            None => serializer.serialize_none(),
        }
    }
}
