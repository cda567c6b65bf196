//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then passed
//! explicitly to the components that need it. Nothing reads the environment
//! after startup.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite URL (default: `sqlite://linktrack.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public prefix of short URLs (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 1000)
//! - `CLICK_WORKER_COUNT` - Number of click workers (default: 4)
//! - `CLICK_ENQUEUE_POLICY` - `block` or `drop` when the queue is full (default: `block`)
//! - `SHUTDOWN_DRAIN_TIMEOUT_SECS` - Time allowed to drain queued clicks on shutdown (default: 10)
//! - `DB_MAX_CONNECTIONS` - Maximum pool size (default: 5)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::domain::click_dispatcher::EnqueuePolicy;
use crate::domain::click_worker::DEFAULT_WORKER_COUNT;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Capacity of the bounded click event channel.
    pub click_queue_capacity: usize,
    /// Number of workers draining the click channel.
    pub click_worker_count: usize,
    /// What a redirect does when the click channel is full.
    pub click_enqueue_policy: EnqueuePolicy,
    /// Upper bound on draining queued clicks during shutdown, in seconds.
    pub shutdown_drain_timeout_secs: u64,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://linktrack.db".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            click_queue_capacity: 1_000,
            click_worker_count: DEFAULT_WORKER_COUNT,
            click_enqueue_policy: EnqueuePolicy::Block,
            shutdown_drain_timeout_secs: 10,
            db_max_connections: 5,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the enqueue
    /// policy is unknown.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let click_enqueue_policy = match env::var("CLICK_ENQUEUE_POLICY") {
            Ok(v) => v
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid CLICK_ENQUEUE_POLICY")?,
            Err(_) => defaults.click_enqueue_policy,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            click_queue_capacity: parse_var("CLICK_QUEUE_CAPACITY", defaults.click_queue_capacity)?,
            click_worker_count: parse_var("CLICK_WORKER_COUNT", defaults.click_worker_count)?,
            click_enqueue_policy,
            shutdown_drain_timeout_secs: parse_var(
                "SHUTDOWN_DRAIN_TIMEOUT_SECS",
                defaults.shutdown_drain_timeout_secs,
            )?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `click_queue_capacity` is outside `1..=1_000_000`
    /// - `click_worker_count` is outside `1..=256`
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - `base_url` is not an absolute HTTP(S) URL
    pub fn validate(&self) -> Result<()> {
        if self.click_queue_capacity == 0 || self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be between 1 and 1000000, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_worker_count == 0 || self.click_worker_count > 256 {
            anyhow::bail!(
                "CLICK_WORKER_COUNT must be between 1 and 256, got {}",
                self.click_worker_count
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        let base = url::Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("BASE_URL must use http or https, got '{}'", self.base_url);
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    pub fn shutdown_drain_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_drain_timeout_secs)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Click queue capacity: {}", self.click_queue_capacity);
        tracing::info!("  Click workers: {}", self.click_worker_count);
        tracing::info!("  Click enqueue policy: {}", self.click_enqueue_policy);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: '{v}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable fails to parse or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
