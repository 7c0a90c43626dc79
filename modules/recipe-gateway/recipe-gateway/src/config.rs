use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the recipe-gateway module.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecipeGatewayConfig {
    /// OpenAI-compatible chat-completions endpoint.
    pub api_url: String,
    #[serde(
        deserialize_with = "secret::deserialize",
        serialize_with = "secret::serialize_redacted"
    )]
    pub api_key: Option<SecretString>,
    pub model: String,
    /// Output bound for image analysis.
    pub analyze_max_tokens: u32,
    /// Sampling temperature for recipe modification.
    pub modify_temperature: f32,
    pub timeout_ms: u64,
}

impl Default for RecipeGatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://ai.gateway.lovable.dev/v1/chat/completions".to_owned(),
            api_key: None,
            model: "google/gemini-2.5-flash".to_owned(),
            analyze_max_tokens: 2000,
            modify_temperature: 0.7,
            timeout_ms: 60_000,
        }
    }
}

impl RecipeGatewayConfig {
    /// Reject settings the module cannot start with.
    ///
    /// # Errors
    /// Returns an error naming the first offending key.
    pub fn validate(&self) -> anyhow::Result<()> {
        let has_key = self
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty());
        if !has_key {
            anyhow::bail!("recipe_gateway.api_key is required (or set LOVABLE_API_KEY)");
        }
        url::Url::parse(&self.api_url).map_err(|e| {
            anyhow::anyhow!("recipe_gateway.api_url '{}' is invalid: {e}", self.api_url)
        })?;
        if self.model.trim().is_empty() {
            anyhow::bail!("recipe_gateway.model must not be empty");
        }
        if self.analyze_max_tokens == 0 {
            anyhow::bail!("recipe_gateway.analyze_max_tokens must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.modify_temperature) {
            anyhow::bail!("recipe_gateway.modify_temperature must be within 0.0..=2.0");
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("recipe_gateway.timeout_ms must be greater than zero");
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
