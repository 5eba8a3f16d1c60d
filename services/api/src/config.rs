//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Where the JSON record store lives on disk.
    pub store_path: PathBuf,
    pub log_level: Level,
    /// Lifetime of a login session, in days.
    pub session_ttl_days: i64,
    /// Artificial latency of one simulated dial run, in milliseconds.
    pub dial_delay_ms: u64,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let store_path = std::env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/callhub-store.json"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Session and Simulation Settings ---
        let session_ttl_days = match std::env::var("SESSION_TTL_DAYS") {
            Ok(raw) => raw.parse::<i64>().map_err(|e| {
                ConfigError::InvalidValue("SESSION_TTL_DAYS".to_string(), e.to_string())
            })?,
            Err(_) => 30,
        };

        let dial_delay_ms = match std::env::var("DIAL_DELAY_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("DIAL_DELAY_MS".to_string(), e.to_string())
            })?,
            Err(_) => 1500,
        };

        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            bind_address,
            store_path,
            log_level,
            session_ttl_days,
            dial_delay_ms,
            cors_origin,
        })
    }
}
