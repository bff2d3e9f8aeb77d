//! Environment-backed configuration.
//!
//! All knobs are read once at startup from `SAATHI_*` environment variables
//! (a local `.env` file is honored via `dotenv`). Every value has a default
//! so a bare `saathi-core` starts against a local generator.

use crate::error::AppError;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

// Defaults match the generator service's local deployment.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_GENERATOR_URL: &str = "http://localhost:5001";
const DEFAULT_PROBE_INTERVAL_SECS: u64 = 30;
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_RECHECK_SECS: u64 = 5;
const DEFAULT_DB_PATH: &str = "saathi.sqlite";
const DEFAULT_RATE_LIMIT: usize = 20;
const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Runtime configuration for the backend.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP API binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the external response generator service.
    pub generator_url: Url,
    /// Fixed cadence of the background health probe.
    pub probe_interval: Duration,
    /// Timeout for a single liveness probe; a timeout counts as a failed probe.
    pub probe_timeout: Duration,
    /// Timeout for a generator query; bounded by the request SLA.
    pub query_timeout: Duration,
    /// Minimum age of the last probe before a dispatch re-probes on demand.
    pub probe_recheck: Duration,
    /// Path of the SQLite chat-history database file.
    pub db_path: String,
    /// Requests allowed per identity per rate window on the chat route.
    pub rate_limit: usize,
    /// Duration of the sliding rate-limit window.
    pub rate_window: Duration,
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Loads configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = env_parsed("SAATHI_BIND_ADDR", DEFAULT_BIND_ADDR.parse().map_err(
            |e| AppError::Config(format!("Invalid default bind address: {}", e)),
        )?)?;

        let generator_raw =
            env::var("SAATHI_GENERATOR_URL").unwrap_or_else(|_| DEFAULT_GENERATOR_URL.to_string());
        let generator_url = Url::parse(&generator_raw)?;

        Ok(Self {
            bind_addr,
            generator_url,
            probe_interval: Duration::from_secs(env_parsed(
                "SAATHI_PROBE_INTERVAL_SECS",
                DEFAULT_PROBE_INTERVAL_SECS,
            )?),
            probe_timeout: Duration::from_secs(env_parsed(
                "SAATHI_PROBE_TIMEOUT_SECS",
                DEFAULT_PROBE_TIMEOUT_SECS,
            )?),
            query_timeout: Duration::from_secs(env_parsed(
                "SAATHI_QUERY_TIMEOUT_SECS",
                DEFAULT_QUERY_TIMEOUT_SECS,
            )?),
            probe_recheck: Duration::from_secs(env_parsed(
                "SAATHI_PROBE_RECHECK_SECS",
                DEFAULT_PROBE_RECHECK_SECS,
            )?),
            db_path: env::var("SAATHI_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            rate_limit: env_parsed("SAATHI_RATE_LIMIT", DEFAULT_RATE_LIMIT)?,
            rate_window: Duration::from_secs(env_parsed(
                "SAATHI_RATE_WINDOW_SECS",
                DEFAULT_RATE_WINDOW_SECS,
            )?),
        })
    }
}
