//! Configuration management for the showcase.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset variables fall back to the default; set but malformed ones are an
//! error.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default `tracing` filter
pub const DEFAULT_LOG_FILTER: &str = "info,showcase=debug";

/// Default counter tick period in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Default simulated gateway latency in milliseconds
pub const DEFAULT_GATEWAY_LATENCY_MS: u64 = 1000;

/// Default graceful shutdown timeout in milliseconds
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5000;

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        /// Environment variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `tracing` filter used when `RUST_LOG` is unset (`SHOWCASE_LOG`)
    pub log_filter: String,
    /// Counter tick period in milliseconds (`SHOWCASE_TICK_MS`)
    pub tick_ms: u64,
    /// Simulated payment latency in milliseconds (`SHOWCASE_PAYMENT_LATENCY_MS`)
    pub payment_latency_ms: u64,
    /// Simulated order latency in milliseconds (`SHOWCASE_ORDER_LATENCY_MS`)
    pub order_latency_ms: u64,
    /// Users endpoint; `None` serves built-in sample records (`SHOWCASE_USERS_URL`)
    pub users_url: Option<String>,
    /// Install the Prometheus recorder (`SHOWCASE_METRICS`)
    pub metrics: bool,
    /// Graceful shutdown timeout in milliseconds (`SHOWCASE_SHUTDOWN_TIMEOUT_MS`)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let users_url = match lookup("SHOWCASE_USERS_URL") {
            None => Some(user_directory::DEFAULT_USERS_URL.to_string()),
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url),
        };

        Ok(Self {
            log_filter: lookup("SHOWCASE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            tick_ms: millis(&lookup, "SHOWCASE_TICK_MS", DEFAULT_TICK_MS)?,
            payment_latency_ms: millis(&lookup, "SHOWCASE_PAYMENT_LATENCY_MS", DEFAULT_GATEWAY_LATENCY_MS)?,
            order_latency_ms: millis(&lookup, "SHOWCASE_ORDER_LATENCY_MS", DEFAULT_GATEWAY_LATENCY_MS)?,
            users_url,
            metrics: flag(&lookup, "SHOWCASE_METRICS", false)?,
            shutdown_timeout_ms: millis(&lookup, "SHOWCASE_SHUTDOWN_TIMEOUT_MS", DEFAULT_SHUTDOWN_TIMEOUT_MS)?,
        })
    }

    /// Counter tick period
    #[must_use]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Simulated payment latency
    #[must_use]
    pub const fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }

    /// Simulated order latency
    #[must_use]
    pub const fn order_latency(&self) -> Duration {
        Duration::from_millis(self.order_latency_ms)
    }

    /// Graceful shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            tick_ms: DEFAULT_TICK_MS,
            payment_latency_ms: DEFAULT_GATEWAY_LATENCY_MS,
            order_latency_ms: DEFAULT_GATEWAY_LATENCY_MS,
            users_url: Some(user_directory::DEFAULT_USERS_URL.to_string()),
            metrics: false,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
        }
    }
}

fn millis<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).map_or(Ok(default), |value| {
        value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
            var,
            value,
            reason: format!("expected milliseconds: {e}"),
        })
    })
}

fn flag<F>(lookup: &F, var: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}
