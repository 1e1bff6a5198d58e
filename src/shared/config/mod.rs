//! Application configuration module
//!
//! Configuration is assembled in three layers, later layers winning:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. An optional TOML file named by `PORTAL_CONFIG`
//! 3. Environment variables (a `.env` file is honoured by the binary)
//!
//! A missing `DATABASE_URL` is a supported mode: the server then runs on the
//! in-memory fallback user store only.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Secret used when `JWT_SECRET` is not configured. Development only.
pub const DEFAULT_JWT_SECRET: &str = "student-portal-dev-secret-change-me";

/// Which token codec the process issues and accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCodecKind {
    /// HS256-signed JWT with expiry
    #[default]
    Signed,
    /// Unsigned base64 payload. Not safe for production.
    Unsigned,
}

impl FromStr for TokenCodecKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "signed" | "jwt" => Ok(Self::Signed),
            "unsigned" | "plain" => Ok(Self::Unsigned),
            _ => Err(ConfigError::InvalidValue {
                key: "TOKEN_CODEC",
                value: value.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// PostgreSQL connection string for the primary user store
    pub database_url: Option<String>,
    /// HMAC secret for signed tokens
    pub jwt_secret: String,
    pub token_codec: TokenCodecKind,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
    /// Upper bound for the primary store probe, in milliseconds
    pub probe_timeout_ms: u64,
    pub bcrypt_cost: u32,
    /// Seed the fallback store with the demo accounts at startup
    pub seed_demo_accounts: bool,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_codec: TokenCodecKind::Signed,
            token_ttl_hours: 24 * 7,
            probe_timeout_ms: 2000,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            seed_demo_accounts: false,
            server_port: 3000,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("token_codec", &self.token_codec)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("probe_timeout_ms", &self.probe_timeout_ms)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("seed_demo_accounts", &self.seed_demo_accounts)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional `PORTAL_CONFIG` file and the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("PORTAL_CONFIG") {
            Ok(path) => {
                tracing::info!("Loading configuration file {}", path);
                let contents = std::fs::read_to_string(&path)?;
                Self::from_toml_str(&contents)?
            }
            Err(_) => Self::default(),
        };

        let config = base.apply_overrides(|key| std::env::var(key).ok())?;
        if config.uses_default_secret() {
            tracing::warn!("JWT_SECRET not set. Using the development secret.");
        }
        Ok(config)
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment-style overrides using `lookup` to resolve keys
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(codec) = lookup("TOKEN_CODEC") {
            self.token_codec = codec.parse()?;
        }
        if let Some(value) = lookup("TOKEN_TTL_HOURS") {
            self.token_ttl_hours = parse_value("TOKEN_TTL_HOURS", &value)?;
        }
        if let Some(value) = lookup("PROBE_TIMEOUT_MS") {
            self.probe_timeout_ms = parse_value("PROBE_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_value("BCRYPT_COST", &value)?;
        }
        if let Some(value) = lookup("SEED_DEMO_ACCOUNTS") {
            self.seed_demo_accounts = parse_value("SEED_DEMO_ACCOUNTS", &value)?;
        }
        if let Some(value) = lookup("SERVER_PORT") {
            self.server_port = parse_value("SERVER_PORT", &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_HOURS",
                value: self.token_ttl_hours.to_string(),
            });
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PROBE_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        Ok(())
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the PostgreSQL connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_codec(mut self, kind: TokenCodecKind) -> Self {
        self.config.token_codec = kind;
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.config.token_ttl_hours = hours;
        self
    }

    pub fn probe_timeout_ms(mut self, millis: u64) -> Self {
        self.config.probe_timeout_ms = millis;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn seed_demo_accounts(mut self, seed: bool) -> Self {
        self.config.seed_demo_accounts = seed;
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}
