//! Application configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `APP_ENV` | `development` |
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `8080` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_POOL` | `10` |
//! | `DATABASE_MIN_IDLE` | `2` |
//! | `DATABASE_CONNECTION_TIMEOUT_MS` | `30000` |
//! | `TASKS_PAGE_SIZE` | `10` |

use crate::task::domain::PageRequest;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Parse failure description.
        reason: String,
    },
}

/// Deployment environment the application runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppEnvironment {
    /// Local development.
    #[default]
    Development,
    /// Automated test runs.
    Test,
    /// Production deployment.
    Production,
}

impl AppEnvironment {
    /// Parses an environment name, falling back to development for unknown
    /// values.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "test" => Self::Test,
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Returns whether this is a production deployment.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns the canonical environment name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_pool_size: u32,
    /// Idle connections kept open.
    pub min_idle: u32,
    /// Time to wait for a pooled connection.
    pub connection_timeout: Duration,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment.
    pub environment: AppEnvironment,
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Tasks shown per list page.
    pub page_size: u32,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `DATABASE_URL` is not set,
    /// or [`ConfigError::InvalidValue`] if a numeric variable cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .map(|value| AppEnvironment::parse_lenient(&value))
            .unwrap_or_default();
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let port = parse_or(&lookup, "PORT", 8080_u16)?;

        let url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_owned()))?;
        let timeout_ms = parse_or(&lookup, "DATABASE_CONNECTION_TIMEOUT_MS", 30_000_u64)?;
        let database = DatabaseConfig {
            url,
            max_pool_size: parse_or(&lookup, "DATABASE_MAX_POOL", 10_u32)?,
            min_idle: parse_or(&lookup, "DATABASE_MIN_IDLE", 2_u32)?,
            connection_timeout: Duration::from_millis(timeout_ms),
        };

        let page_size = parse_or(&lookup, "TASKS_PAGE_SIZE", PageRequest::DEFAULT_PAGE_SIZE)?
            .clamp(1, PageRequest::MAX_PAGE_SIZE);

        Ok(Self {
            environment,
            host,
            port,
            database,
            page_size,
        })
    }

    /// Returns the `host:port` socket address string.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        name: name.to_owned(),
        reason: err.to_string(),
    })
}
