//! services/api/src/error.rs
//!
//! The top-level error type for the `api` service. Everything that can go
//! wrong between `main` starting and a request being answered converges here.

use crate::config::ConfigError;
use callhub_core::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The environment was missing or carried an unusable setting.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A failure bubbled up through one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Socket binding and other plain I/O failures.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything that has no better home, carried as a message.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
