//! # Environment Configuration Module
//!
//! Every setting is resolved in the same order: an explicit override first,
//! then the process environment (after loading `.env` with `dotenvy`), then a
//! default where one exists.

use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::retrieve::API_URL;

/// Public API key. Required.
pub const ENV_PUBLIC_KEY: &str = "MARVEL_PUBLIC_KEY";
/// Private API key. Selects server-side authentication when present.
pub const ENV_PRIVATE_KEY: &str = "MARVEL_PRIVATE_KEY";
/// Base endpoint override.
pub const ENV_API_URL: &str = "MARVEL_API_URL";
/// Whole-request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MARVEL_TIMEOUT_SECS";

/// Timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while resolving the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is neither overridden nor set in the environment.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A setting is present but cannot be used.
    #[error("Invalid value for {name}: {reason}")]
    Invalid {
        /// The variable name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Explicit values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Overrides `MARVEL_PUBLIC_KEY`.
    pub public_key: Option<String>,
    /// Overrides `MARVEL_PRIVATE_KEY`.
    pub private_key: Option<String>,
    /// Overrides `MARVEL_API_URL`.
    pub api_url: Option<String>,
    /// Overrides `MARVEL_TIMEOUT_SECS`.
    pub timeout_secs: Option<u64>,
}

/// # Marvel Config
///
/// Everything needed to build a [`crate::Client`].
#[derive(Clone, PartialEq, Eq)]
pub struct MarvelConfig {
    /// Public API key, sent as `apikey`.
    pub public_key: String,
    /// Private API key. `None` selects client-side authentication.
    pub private_key: Option<String>,
    /// Base endpoint.
    pub api_url: String,
    /// Whole-request timeout applied to the transport.
    pub timeout: Duration,
}

impl std::fmt::Debug for MarvelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarvelConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MarvelConfig {
    /// Loads the configuration from the environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(ConfigOverrides::default())
    }

    /// Loads the configuration, preferring `overrides` over the environment.
    ///
    /// A `.env` file in the working directory (or its parents) is loaded
    /// first when present; variables already set in the process win.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env file");
        }
        Self::resolve(overrides, |name| env::var(name).ok())
    }

    /// Resolves the configuration against an arbitrary variable source.
    fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let public_key = overrides
            .public_key
            .or_else(|| non_empty(ENV_PUBLIC_KEY))
            .ok_or_else(|| ConfigError::MissingEnvVar(ENV_PUBLIC_KEY.to_string()))?;

        let private_key = overrides.private_key.or_else(|| non_empty(ENV_PRIVATE_KEY));

        let api_url = overrides
            .api_url
            .or_else(|| non_empty(ENV_API_URL))
            .unwrap_or_else(|| API_URL.to_string());
        url::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            name: ENV_API_URL.to_string(),
            reason: e.to_string(),
        })?;

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match non_empty(ENV_TIMEOUT_SECS) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: ENV_TIMEOUT_SECS.to_string(),
                    reason: e.to_string(),
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_TIMEOUT_SECS.to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            public_key: public_key.trim().to_string(),
            private_key: private_key.map(|k| k.trim().to_string()),
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
