/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * (optionally via a `.env` file loaded by the binary) and opens the SQLite
 * connection pool.
 *
 * # Configuration Sources
 *
 * | Variable           | Default                        |
 * |--------------------|--------------------------------|
 * | `SERVER_PORT`      | `5000`                         |
 * | `DATABASE_URL`     | `sqlite://allynet.db?mode=rwc` |
 * | `JWT_SECRET`       | development fallback (warned)  |
 * | `TOKEN_TTL_DAYS`   | `7`                            |
 * | `BCRYPT_COST`      | `bcrypt::DEFAULT_COST`         |
 * | `UPLOAD_DIR`       | `uploads`                      |
 * | `MAX_UPLOAD_BYTES` | `5242880`                      |
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

use crate::backend::error::StartupError;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://allynet.db?mode=rwc";
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);
const DEV_JWT_SECRET: &str = "allynet-development-secret-change-me";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Runtime settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    /// HMAC secret for signing session tokens
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    /// Directory uploaded files are written to and served from
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps variable names to
    /// values. Unset variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_var("SERVER_PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        match lookup("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => {
                tracing::warn!("JWT_SECRET not set. Using the development secret.");
            }
        }
        if let Some(days) = lookup("TOKEN_TTL_DAYS") {
            builder = builder.token_ttl_days(parse_var("TOKEN_TTL_DAYS", &days)?);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(bytes) = lookup("MAX_UPLOAD_BYTES") {
            builder = builder.max_upload_bytes(parse_var("MAX_UPLOAD_BYTES", &bytes)?);
        }

        builder.build()
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    port: u16,
    database_url: String,
    jwt_secret: String,
    token_ttl_days: i64,
    bcrypt_cost: u32,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_days = days;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.database_url.is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.token_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_DAYS",
                value: self.token_ttl_days.to_string(),
            });
        }
        // bcrypt accepts costs 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }

        Ok(ServerConfig {
            port: self.port,
            database_url: self.database_url,
            jwt_secret: self.jwt_secret,
            token_ttl_days: self.token_ttl_days,
            bcrypt_cost: self.bcrypt_cost,
            upload_dir: self.upload_dir,
            max_upload_bytes: self.max_upload_bytes,
        })
    }
}

/// Open the SQLite pool and run the embedded migrations
///
/// The database file is created if missing. Foreign keys are enforced by the
/// sqlx SQLite driver, which the cascading deletes rely on.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, StartupError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}

/// Start a transaction that takes the write lock up front
///
/// A deferred transaction that reads and then writes cannot wait for the
/// lock once another writer holds it; SQLite fails it with `SQLITE_BUSY`.
/// `BEGIN IMMEDIATE` queues behind the busy timeout instead.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}
