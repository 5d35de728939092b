//! Environment-sourced configuration.
//!
//! Values come from the process environment after `.env` files are loaded in
//! `main`. Parsing goes through a lookup function so tests never touch the
//! real environment.

use std::fmt;
use std::time::Duration;

/// Model used when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "phi3:mini";

/// Decoding temperature sent with every generation request.
pub const GENERATION_TEMPERATURE: f32 = 0.5;

/// Upper bound on generated tokens per reply.
pub const GENERATION_MAX_TOKENS: u32 = 200;

/// Request-level deadline for a generation call.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(300);

pub const DEFAULT_DATABASE_URL: &str = "sqlite:pitlane.db?mode=rwc";
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Username/password pair for the inference backend.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the inference client needs. Generation options are fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    pub endpoint: String,
    pub credentials: Option<BasicAuth>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: GENERATION_TEMPERATURE,
            max_tokens: GENERATION_MAX_TOKENS,
            timeout: GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// `LLM_API_URL` is required; credentials apply only when both halves are set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = non_blank(lookup("LLM_API_URL")).ok_or(ConfigError::Missing("LLM_API_URL"))?;

        let mut config = Self::new(endpoint);
        if let Some(model) = non_blank(lookup("LLM_MODEL")) {
            config.model = model;
        }

        let username = non_blank(lookup("LLM_API_USERNAME"));
        let password = non_blank(lookup("LLM_API_PASSWORD"));
        if let (Some(username), Some(password)) = (username, password) {
            config = config.with_credentials(username, password);
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// `*` or a comma-separated origin list. CORS is off when unset.
    pub cors_allowed_origins: Option<String>,
}

impl ServerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_blank(lookup("SERVER_PORT")).or_else(|| non_blank(lookup("PORT"))) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            host: non_blank(lookup("SERVER_HOST")).unwrap_or_else(|| DEFAULT_SERVER_HOST.into()),
            port,
            database_url: non_blank(lookup("DATABASE_URL"))
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            cors_allowed_origins: non_blank(lookup("CORS_ALLOWED_ORIGINS")),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub inference: InferenceConfig,
    pub server: ServerConfig,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            inference: InferenceConfig::from_lookup(&lookup)?,
            server: ServerConfig::from_lookup(&lookup)?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_endpoint_is_a_configuration_error() {
        let err = EngineConfig::from_lookup(lookup(&[])).expect_err("config should be rejected");
        assert_eq!(err, ConfigError::Missing("LLM_API_URL"));

        let err = InferenceConfig::from_lookup(lookup(&[("LLM_API_URL", "   ")])).expect_err("config should be rejected");
        assert_eq!(err, ConfigError::Missing("LLM_API_URL"));
    }

    #[test]
    fn endpoint_alone_gives_fixed_generation_options() {
        let config =
            InferenceConfig::from_lookup(lookup(&[("LLM_API_URL", "http://llm:11434/api/generate")]))
                .expect("config");
        assert_eq!(config.endpoint, "http://llm:11434/api/generate");
        assert_eq!(config.model, "phi3:mini");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn credentials_need_both_username_and_password() {
        let only_user = InferenceConfig::from_lookup(lookup(&[
            ("LLM_API_URL", "http://llm"),
            ("LLM_API_USERNAME", "dax"),
        ]))
        .expect("config");
        assert!(only_user.credentials.is_none());

        let both = InferenceConfig::from_lookup(lookup(&[
            ("LLM_API_URL", "http://llm"),
            ("LLM_API_USERNAME", "dax"),
            ("LLM_API_PASSWORD", "pit"),
        ]))
        .expect("config");
        assert_eq!(both.credentials.as_ref().map(|c| c.username.as_str()), Some("dax"));
    }

    #[test]
    fn password_is_redacted_in_debug_output() {
        let config = InferenceConfig::new("http://llm").with_credentials("dax", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn server_defaults_and_invalid_port() {
        let server = ServerConfig::from_lookup(lookup(&[])).expect("server config");
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 3000);
        assert_eq!(server.database_url, DEFAULT_DATABASE_URL);
        assert!(server.cors_allowed_origins.is_none());

        let err = ServerConfig::from_lookup(lookup(&[("SERVER_PORT", "pit")])).expect_err("config should be rejected");
        assert!(matches!(err, ConfigError::Invalid { name: "SERVER_PORT", .. }));
    }
}
