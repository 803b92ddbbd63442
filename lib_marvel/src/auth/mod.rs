//! # Authentication Module
//!
//! Every request to the Marvel API carries authentication query parameters.
//! Two strategies are supported, both behind the [`Authenticator`] trait:
//!
//! - **`ServerSideAuth`**: public key, timestamp and an MD5 proof
//!   `md5(ts + privateKey + publicKey)`. Use it wherever the private key can
//!   stay secret.
//! - **`ClientSideAuth`**: the public key alone. The API relies on its referrer
//!   allow-list instead of a hash, so no secret is involved.
//!
//! The [`crate::client::Client`] asks its authenticator for fresh parameters on
//! every request, so server-side hashes never go stale.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Pluggable timestamp sources for server-side authentication.
pub mod timestamp;

use md5::{Digest, Md5};
use serde::Serialize;
use std::fmt;

pub use timestamp::{SystemTimestamper, Timestamper};

/// # Auth Params
///
/// The query parameters the API uses to authenticate a request.
///
/// Fields are serialized in the order `apikey`, `hash`, `ts`; unset fields are
/// left out of the query string entirely. A hash is only ever present together
/// with its timestamp, which the constructors guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthParams {
    #[serde(rename = "apikey")]
    public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
    #[serde(rename = "ts", skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl AuthParams {
    /// Parameters for server-side authentication.
    pub fn server_side(
        timestamp: impl Into<String>,
        public_key: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            hash: Some(hash.into()),
            timestamp: Some(timestamp.into()),
        }
    }

    /// Parameters for client-side authentication (public key only).
    pub fn client_side(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            hash: None,
            timestamp: None,
        }
    }

    /// The public API key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The timestamp the hash was computed over, if any.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// The MD5 proof, if any.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}

/// Produces the [`AuthParams`] attached to outgoing requests.
///
/// Implementations must be cheap and callable concurrently; the client calls
/// `produce` once per request.
pub trait Authenticator: Send + Sync {
    /// Returns the parameters for the next request.
    fn produce(&self) -> AuthParams;
}

/// Computes `md5(timestamp || private_key || public_key)` as lower-case hex.
///
/// The order and the absence of separators are dictated by the API; any other
/// combination is rejected server-side as `InvalidCredentials`.
pub fn auth_hash(timestamp: &str, private_key: &str, public_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(private_key.as_bytes());
    hasher.update(public_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// # Server Side Auth
///
/// Holds both API keys and the timestamp source. Each call to
/// [`Authenticator::produce`] draws a new timestamp and recomputes the hash.
pub struct ServerSideAuth {
    public_key: String,
    private_key: String,
    timestamper: Box<dyn Timestamper>,
}

impl ServerSideAuth {
    /// Creates a server-side authenticator using the system clock.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            timestamper: Box::new(SystemTimestamper),
        }
    }

    /// Replaces the timestamp source.
    ///
    /// Consumes the authenticator, so the source is fixed before the value is
    /// shared with a client.
    pub fn with_timestamper<T>(mut self, timestamper: T) -> Self
    where
        T: Timestamper + 'static,
    {
        self.timestamper = Box::new(timestamper);
        self
    }

    /// The public API key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl Authenticator for ServerSideAuth {
    fn produce(&self) -> AuthParams {
        let ts = self.timestamper.timestamp();
        let hash = auth_hash(&ts, &self.private_key, &self.public_key);
        AuthParams::server_side(ts, self.public_key.clone(), hash)
    }
}

impl fmt::Debug for ServerSideAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSideAuth")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// # Client Side Auth
///
/// Authenticates with the public key only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSideAuth {
    public_key: String,
}

impl ClientSideAuth {
    /// Creates a client-side authenticator.
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }
}

impl Authenticator for ClientSideAuth {
    fn produce(&self) -> AuthParams {
        AuthParams::client_side(self.public_key.clone())
    }
}
