//! # Error Types
//!
//! Every fallible operation in `lib_marvel` returns [`MarvelError`]. Transport
//! failures, request-building failures and malformed bodies are kept apart from
//! semantic failures the API embeds inside an otherwise well-formed response
//! body, which surface as [`ApiError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[cfg(feature = "configs")]
use crate::configs::ConfigError;

/// Errors that can occur while talking to the Marvel API.
#[derive(Debug, Error)]
pub enum MarvelError {
    /// The transport (or a middleware layered on it) failed before a response arrived.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Building the request or reading the response body failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL or a relative path could not be parsed.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A successful response carried a body that is not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered, but the body reports a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A request path resolved outside the base URL (absolute URL or `../`).
    #[error("marvel: path {0:?} escapes the base URL")]
    PathEscape(String),

    /// A lookup by ID returned no results.
    #[error("marvel: no {entity} found with id {id}")]
    NotFound {
        /// Path segment of the entity that was requested.
        entity: &'static str,
        /// The requested identifier.
        id: u64,
    },

    /// Client configuration could not be resolved.
    #[cfg(feature = "configs")]
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MarvelError {
    /// Returns the embedded [`ApiError`] if this is a semantic API failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            MarvelError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// The `code` field of an error body.
///
/// Authentication failures report a string (`"InvalidCredentials"`), usage
/// errors report an integer (`409`). Both land in the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiCode {
    /// Numeric code, used for usage errors and for successful responses.
    Int(i64),
    /// Symbolic code, used for authentication errors.
    Text(String),
}

impl ApiCode {
    /// True when the code reports a failure.
    ///
    /// Successful bodies carry `200`, so a numeric code only counts as a failure
    /// when it is neither zero nor in the 2xx range.
    pub fn is_failure(&self) -> bool {
        match self {
            ApiCode::Int(n) => *n != 0 && !(200..300).contains(n),
            ApiCode::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ApiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiCode::Int(n) => write!(f, "{}", n),
            ApiCode::Text(s) => f.write_str(s),
        }
    }
}

/// A failure reported inside the response body.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("marvel: {code} {message}")]
pub struct ApiError {
    /// The code exactly as the API sent it.
    pub code: ApiCode,
    /// Human readable explanation.
    #[serde(default)]
    pub message: String,
    /// HTTP status of the response that carried the error, when known.
    #[serde(skip)]
    pub http_status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_code_formats_with_namespace() {
        let err: ApiError =
            serde_json::from_str(r#"{"code": 404, "message": "something's not found"}"#).unwrap();
        assert_eq!(err.code, ApiCode::Int(404));
        assert_eq!(err.to_string(), "marvel: 404 something's not found");
    }

    #[test]
    fn string_code_formats_with_namespace() {
        let err: ApiError =
            serde_json::from_str(r#"{"code": "NotFound", "message": "still not found"}"#).unwrap();
        assert_eq!(err.code, ApiCode::Text("NotFound".into()));
        assert_eq!(err.to_string(), "marvel: NotFound still not found");
    }

    #[test]
    fn failure_detection() {
        assert!(ApiCode::Int(409).is_failure());
        assert!(ApiCode::Text("InvalidCredentials".into()).is_failure());
        assert!(!ApiCode::Int(200).is_failure());
        assert!(!ApiCode::Int(0).is_failure());
        assert!(!ApiCode::Text(String::new()).is_failure());
    }

    #[test]
    fn api_error_is_transparent_in_marvel_error() {
        let err = MarvelError::from(ApiError {
            code: ApiCode::Int(409),
            message: "Limit greater than 100.".into(),
            http_status: Some(409),
        });
        assert_eq!(err.to_string(), "marvel: 409 Limit greater than 100.");
        assert!(err.api_error().is_some());
    }
}
