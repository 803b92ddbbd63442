//! # lib_marvel
//!
//! A typed client for the Marvel Comics public REST API.
//!
//! Core modules are always compiled. Optional concerns are gated by folder:
//!
//! - **`configs`**: resolve keys, base URL and timeout from the environment.
//! - **`loggers`**: install a `tracing` subscriber with console and rolling
//!   JSON file output.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// Authentication parameter producers.
pub mod auth;
/// The top-level client.
pub mod client;
/// Envelope, container and shared data types.
pub mod data;
/// Error types.
pub mod errors;
/// The authenticated request pipeline.
pub mod retrieve;
/// Typed entity models and services.
pub mod services;

#[cfg(feature = "configs")]
pub mod configs;

#[cfg(feature = "loggers")]
pub mod loggers;

pub use auth::{
    auth_hash, AuthParams, Authenticator, ClientSideAuth, ServerSideAuth, SystemTimestamper, Timestamper,
};
pub use client::Client;
pub use data::{ApiTime, DataContainer, DataWrapper, Image, Link, ResourceList, Summary};
pub use errors::{ApiCode, ApiError, MarvelError};
pub use retrieve::{ApiResponse, API_URL};
pub use services::{
    Character, CharacterParams, Comic, ComicParams, Creator, CreatorParams, Entity, EntityService, Event,
    EventParams, Series, SeriesParams, Story, StoryParams,
};

#[cfg(feature = "configs")]
pub use configs::{ConfigError, ConfigOverrides, MarvelConfig};

#[cfg(feature = "loggers")]
pub use loggers::{init_logging, LoggingOptions};
