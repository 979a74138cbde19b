//! # hub-common
//!
//! Shared utilities: environment-based configuration, the unified error
//! type, and tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{AppSettings, ConfigError, Environment, HubConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
