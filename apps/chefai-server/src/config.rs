//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the YAML file given with
//! `--config`, `CHEFAI__SECTION__KEY` environment variables, the legacy
//! `LOVABLE_API_KEY`/`RESEND_API_KEY` variables, and finally CLI flags.

use std::net::SocketAddr;
use std::path::Path;

use access_auth::AccessAuthConfig;
use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use recipe_gateway::RecipeGatewayConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CHEFAI__";
pub const LEGACY_GATEWAY_KEY: &str = "LOVABLE_API_KEY";
pub const LEGACY_EMAIL_KEY: &str = "RESEND_API_KEY";

/// DSN used by `--mock`.
pub const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub modules: ModulesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub request_timeout_ms: u64,
    /// Upper bound for request bodies; images arrive inline as base64.
    pub max_body_bytes: usize,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            request_timeout_ms: 90_000,
            max_body_bytes: 12 * 1024 * 1024,
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_headers: ["authorization", "x-client-info", "apikey", "content-type"]
                .map(str::to_owned)
                .to_vec(),
            allowed_methods: ["GET", "POST", "OPTIONS"].map(str::to_owned).to_vec(),
            max_age_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub dsn: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://chefai.db?mode=rwc".to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesConfig {
    pub access_auth: AccessAuthConfig,
    pub recipe_gateway: RecipeGatewayConfig,
}

/// Overrides taken from the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Merge every configuration source except the CLI.
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or the merged result does not
    /// match the schema.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[LEGACY_GATEWAY_KEY])
                    .map(|_| "modules.recipe_gateway.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&[LEGACY_EMAIL_KEY])
                    .map(|_| "modules.access_auth.email.api_key".into()),
            )
            .extract()
            .context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) {
        if let Some(port) = cli.port
            && let Ok(mut addr) = self.server.bind_addr.parse::<SocketAddr>()
        {
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        if cli.mock {
            MOCK_DSN.clone_into(&mut self.database.dsn);
        }
    }

    /// Reject configurations the server cannot start with.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> anyhow::Result<SocketAddr> {
        let addr = self
            .server
            .bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("server.bind_addr '{}' is invalid", self.server.bind_addr))?;
        if self.server.request_timeout_ms == 0 {
            anyhow::bail!("server.request_timeout_ms must be greater than zero");
        }
        if self.server.max_body_bytes == 0 {
            anyhow::bail!("server.max_body_bytes must be greater than zero");
        }
        if self.database.dsn.trim().is_empty() {
            anyhow::bail!("database.dsn must not be empty");
        }
        self.modules.access_auth.validate()?;
        self.modules.recipe_gateway.validate()?;
        Ok(addr)
    }

    /// Effective configuration as YAML, secrets redacted.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write as _;

    use secrecy::ExposeSecret;

    use super::*;

    const SCRUBBED: [(&str, Option<&str>); 2] =
        [(LEGACY_GATEWAY_KEY, None), (LEGACY_EMAIL_KEY, None)];

    const KEYS_YAML: &str = r"
modules:
  access_auth:
    email:
      api_key: re_file
  recipe_gateway:
    api_key: lov_file
";

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_file() {
        temp_env::with_vars(SCRUBBED, || {
            let cfg = AppConfig::load(None).unwrap();
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:8087");
            assert_eq!(cfg.modules.access_auth.code_ttl_secs, 600);
            assert_eq!(cfg.modules.recipe_gateway.model, "google/gemini-2.5-flash");
            assert!(cfg.validate().is_err(), "keys are required");
        });
    }

    #[test]
    fn file_keys_make_config_valid() {
        let file = yaml_file(KEYS_YAML);
        temp_env::with_vars(SCRUBBED, || {
            let cfg = AppConfig::load(Some(file.path())).unwrap();
            let addr = cfg.validate().unwrap();
            assert_eq!(addr.port(), 8087);
        });
    }

    #[test]
    fn prefixed_env_overrides_file() {
        let file = yaml_file(
            r"
server:
  bind_addr: 0.0.0.0:9000
logging:
  json: false
",
        );
        temp_env::with_vars(
            [
                ("CHEFAI__SERVER__BIND_ADDR", Some("127.0.0.1:9100")),
                ("CHEFAI__LOGGING__JSON", Some("true")),
            ],
            || {
                let cfg = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(cfg.server.bind_addr, "127.0.0.1:9100");
                assert!(cfg.logging.json);
            },
        );
    }

    #[test]
    fn legacy_env_names_fill_api_keys() {
        temp_env::with_vars(
            [
                (LEGACY_GATEWAY_KEY, Some("lov_env")),
                (LEGACY_EMAIL_KEY, Some("re_env")),
            ],
            || {
                let cfg = AppConfig::load(None).unwrap();
                cfg.validate().unwrap();
                let gateway_key = cfg.modules.recipe_gateway.api_key.as_ref().unwrap();
                assert_eq!(gateway_key.expose_secret(), "lov_env");
                let email_key = cfg.modules.access_auth.email.api_key.as_ref().unwrap();
                assert_eq!(email_key.expose_secret(), "re_env");
            },
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("server:\n  listen: 0.0.0.0:1\n");
        temp_env::with_vars(SCRUBBED, || {
            assert!(AppConfig::load(Some(file.path())).is_err());
        });
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(CliOverrides {
            port: Some(9999),
            verbose: 2,
            mock: true,
        });
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9999");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.database.dsn, MOCK_DSN);
    }

    #[test]
    fn yaml_output_redacts_secrets() {
        let file = yaml_file(KEYS_YAML);
        temp_env::with_vars(SCRUBBED, || {
            let yaml = AppConfig::load(Some(file.path())).unwrap().to_yaml().unwrap();
            assert!(yaml.contains("[REDACTED]"));
            assert!(!yaml.contains("lov_file"));
            assert!(!yaml.contains("re_file"));
        });
    }

    #[test]
    fn invalid_bind_addr_is_reported() {
        let mut cfg = AppConfig::default();
        "not-an-address".clone_into(&mut cfg.server.bind_addr);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("server.bind_addr"));
    }
}
