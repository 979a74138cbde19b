//! Application error types
//!
//! Only startup can fail fatally: a bad configuration value or an
//! unbindable listen address. Everything after that is handled where it
//! happens and logged, never escalated.

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Listener errors (the only fatal runtime condition)
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Convenience result alias using `AppError`
pub type AppResult<T> = Result<T, AppError>;
