use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

/// PostgreSQL connection pool configuration.
///
/// The pool is the only cross-request shared resource: a fixed base pool
/// plus an overflow allowance, connections recycled after sitting idle,
/// and a bounded checkout wait after which acquisition fails rather than
/// queuing indefinitely. Connections are liveness-checked before reuse.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Base number of pooled connections, kept warm
    pub pool_size: u32,

    /// Extra connections allowed when the base pool is saturated
    pub max_overflow: u32,

    /// How long a checkout may wait before failing the request
    pub acquire_timeout_secs: u64,

    /// Recycle a connection after it has been idle this long
    pub idle_timeout_secs: u64,

    /// Hard cap on connection lifetime
    pub max_lifetime_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: 10,
            max_overflow: 10,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 900,
            max_lifetime_secs: 1800,
            sqlx_logging: true,
        }
    }

    /// Convert this config into SeaORM ConnectOptions.
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.min_connections(self.pool_size)
            .max_connections(self.pool_size + self.max_overflow)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .test_before_acquire(true)
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FromEnv for PostgresConfig {
    /// Environment variables:
    /// - `DATABASE_URL` (required)
    /// - `DB_POOL_SIZE` (optional, default: 10)
    /// - `DB_MAX_OVERFLOW` (optional, default: 10)
    /// - `DB_ACQUIRE_TIMEOUT_SECS` (optional, default: 5)
    /// - `DB_IDLE_TIMEOUT_SECS` (optional, default: 900)
    /// - `DB_MAX_LIFETIME_SECS` (optional, default: 1800)
    /// - `DB_SQLX_LOGGING` (optional, default: true)
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;

        fn parsed<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
        where
            T::Err: std::fmt::Display,
        {
            env_or_default(key, default)
                .parse()
                .map_err(|e: T::Err| ConfigError::ParseError {
                    key: key.to_string(),
                    details: format!("{}", e),
                })
        }

        Ok(Self {
            url,
            pool_size: parsed("DB_POOL_SIZE", "10")?,
            max_overflow: parsed("DB_MAX_OVERFLOW", "10")?,
            acquire_timeout_secs: parsed("DB_ACQUIRE_TIMEOUT_SECS", "5")?,
            idle_timeout_secs: parsed("DB_IDLE_TIMEOUT_SECS", "900")?,
            max_lifetime_secs: parsed("DB_MAX_LIFETIME_SECS", "1800")?,
            sqlx_logging: parsed("DB_SQLX_LOGGING", "true")?,
        })
    }
}
