//! # Configuration Modules
//!
//! Resolves API credentials and transport settings from explicit arguments,
//! the process environment and an optional `.env` file.

/// Environment-backed client configuration.
pub mod config_env;

pub use config_env::*;
