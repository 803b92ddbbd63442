//! # Data Retrieval Module
//!
//! This module holds the request pipeline every entity service funnels
//! through: authenticated GET request construction, dispatch over a
//! `reqwest-middleware` client, and demultiplexing of the response body into
//! either a typed envelope or an [`crate::errors::ApiError`].
//!
//! ## Contained Modules:
//!
//! - **`api_client`**: The `ApiClient` that owns the base URL, the
//!   authenticator and the transport, plus the `ApiResponse` returned by every
//!   call.
//! - **`query`**: Serde helpers that encode entity query parameters the way
//!   the API expects them (comma-joined ID sets, RFC 3339 dates).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Authenticated request building and response demultiplexing.
pub mod api_client;
/// Query string encoding helpers for entity parameters.
pub mod query;

pub use api_client::{ApiClient, ApiResponse, API_URL};
