//! Configuration
//!
//! Loaded from environment variables, with `.env` support for
//! development.

mod app_config;

pub use app_config::{AppSettings, ConfigError, Environment, HubConfig, ServerConfig};
