/**
 * Server Configuration
 *
 * Settings read from the environment (after `.env` is loaded in `main`),
 * or assembled with `ServerConfig::builder()` in tests.
 *
 * # Variables
 *
 * | Variable                   | Default                 |
 * |----------------------------|-------------------------|
 * | `HOST`                     | `0.0.0.0`               |
 * | `PORT`                     | `3000`                  |
 * | `DATABASE_URL`             | unset: in-memory store  |
 * | `DATABASE_MAX_CONNECTIONS` | `5`                     |
 * | `JWT_SECRET`               | dev secret (debug only) |
 * | `JWT_EXPIRES_IN_SECS`      | `2592000` (30 days)     |
 * | `BCRYPT_COST`              | `10`                    |
 */

use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Used when `JWT_SECRET` is unset; never suitable outside development.
pub const DEV_JWT_SECRET: &str = "boardwalk-dev-secret-change-me";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("BCRYPT_COST must be between {min} and {max}, got {got}")]
    BcryptCostOutOfRange { got: u32, min: u32, max: u32 },

    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(host) = get("HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = get("PORT") {
            builder = builder.port(parse("PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(max) = get("DATABASE_MAX_CONNECTIONS") {
            builder = builder.max_connections(parse("DATABASE_MAX_CONNECTIONS", &max)?);
        }
        match get("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            #[cfg(not(debug_assertions))]
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
            #[cfg(debug_assertions)]
            None => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }
        if let Some(ttl) = get("JWT_EXPIRES_IN_SECS") {
            builder = builder.token_ttl_secs(parse("JWT_EXPIRES_IN_SECS", &ttl)?);
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &cost)?);
        }
        builder.build()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(bcrypt_cost_range().contains(&self.bcrypt_cost)) {
            return Err(ConfigError::BcryptCostOutOfRange {
                got: self.bcrypt_cost,
                min: *bcrypt_cost_range().start(),
                max: *bcrypt_cost_range().end(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRES_IN_SECS",
                value: "0".to_string(),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        Ok(())
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: "HOST",
                value: self.host.clone(),
            })
    }
}

fn bcrypt_cost_range() -> std::ops::RangeInclusive<u32> {
    4..=31
}

fn parse<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    max_connections: Option<u32>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    bcrypt_cost: Option<u32>,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_secs(mut self, ttl: u64) -> Self {
        self.token_ttl_secs = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let config = ServerConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_secs: self.token_ttl_secs.unwrap_or(defaults.token_ttl_secs),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
        };
        config.validate()?;
        Ok(config)
    }
}
