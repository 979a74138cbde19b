//! Error handling
//!
//! Unified application error type.

mod app_error;

pub use app_error::{AppError, AppResult};
