//! # Request Pipeline
//!
//! `ApiClient` composes, sends and decodes every request made to the API.
//!
//! ## Logic:
//! 1. The authenticator is asked for fresh [`AuthParams`]; they go into the
//!    query string first, followed by the caller's entity parameters.
//! 2. A GET request is built against `base + path`. Paths are relative to the
//!    base (`characters/1009610/comics`); the base always ends with `/`.
//! 3. The request is dispatched. Transport failures are returned immediately.
//! 4. The body is decoded once into [`ResponseBody`], the superset of the
//!    success envelope and the error body. The API reports many usage errors
//!    inside the body rather than through the HTTP status, so the decision is
//!    made on the body's `code`.

use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{AuthParams, Authenticator};
use crate::data::{DataWrapper, ResponseBody};
use crate::errors::{ApiCode, ApiError, MarvelError};

/// Base URL for all API requests. The trailing slash is significant.
pub const API_URL: &str = "https://gateway.marvel.com/v1/public/";

/// # Api Response
///
/// A decoded envelope together with metadata about the HTTP transaction that
/// carried it.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded envelope.
    pub envelope: DataWrapper<T>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// The headers returned by the server.
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// The entities of the returned page.
    pub fn results(&self) -> &[T] {
        &self.envelope.data.results
    }

    /// Consumes the response, keeping only the entities.
    pub fn into_results(self) -> Vec<T> {
        self.envelope.data.results
    }
}

/// # Api Client
///
/// Owns the base URL, the authenticator and the transport. Cheap to share
/// behind an `Arc`; every entity service holds one.
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
    /// Source of the authentication query parameters.
    authenticator: Arc<dyn Authenticator>,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// A missing trailing slash is added so that relative paths resolve below
    /// the base instead of replacing its last segment.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL, e.g. [`API_URL`].
    /// * `authenticator` - Produces the auth parameters for each request.
    /// * `transport` - The HTTP client to use. `None` builds a default one.
    pub fn new(
        base_url: &str,
        authenticator: Arc<dyn Authenticator>,
        transport: Option<ClientWithMiddleware>,
    ) -> Result<Self, MarvelError> {
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        Ok(Self::from_parts(base_url, authenticator, transport))
    }

    /// Creates a client for an already parsed base URL ending with `/`.
    pub(crate) fn from_parts(
        base_url: Url,
        authenticator: Arc<dyn Authenticator>,
        transport: Option<ClientWithMiddleware>,
    ) -> Self {
        let inner =
            transport.unwrap_or_else(|| ClientBuilder::new(reqwest::Client::new()).build());

        Self {
            inner,
            base_url,
            authenticator,
        }
    }

    /// The base URL all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The authentication parameters the next request would carry.
    pub fn auth_params(&self) -> AuthParams {
        self.authenticator.produce()
    }

    /// Builds the request `execute` would send, without sending it.
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL. A leading `/` is ignored.
    /// * `params` - Entity query parameters, appended after the auth params.
    ///   Parameters named like an auth parameter are dropped.
    ///
    /// # Errors
    /// * [`MarvelError::PathEscape`] when `path` resolves outside the base URL.
    /// * Fails when the path cannot be joined or the parameters cannot be encoded.
    pub fn request<P>(&self, path: &str, params: &P) -> Result<Request, MarvelError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(MarvelError::PathEscape(path.to_string()));
        }
        let auth = self.authenticator.produce();

        let mut request = self.inner.get(url).query(&auth).query(params).build()?;
        strip_reserved_params(&mut request, auth_pair_count(&auth));
        Ok(request)
    }

    /// Sends an authenticated GET request and decodes the envelope.
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL.
    /// * `params` - Entity query parameters.
    ///
    /// # Errors
    /// * [`MarvelError::Transport`] when the request could not be completed.
    /// * [`MarvelError::Api`] when the body reports a failure, whatever the
    ///   HTTP status.
    /// * [`MarvelError::Decode`] when a 2xx body is not a valid envelope.
    pub async fn execute<T, P>(&self, path: &str, params: &P) -> Result<ApiResponse<T>, MarvelError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = self.request(path, params)?;
        debug!(method = %request.method(), path = request.url().path(), "dispatching request");

        let response = self.inner.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let body: ResponseBody<T> = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                // Non-JSON error pages (gateway errors and the like).
                return Err(status_error(status).into());
            }
            Err(e) => return Err(e.into()),
        };

        let (envelope, api_error) = body.into_parts();

        if let Some(mut error) = api_error {
            error.http_status = Some(status.as_u16());
            warn!(path, http_status = status.as_u16(), code = %error.code, message = %error.message, "API reported an error");
            return Err(error.into());
        }

        if !status.is_success() {
            let error = status_error(status);
            warn!(path, http_status = status.as_u16(), "API answered with a failure status");
            return Err(error.into());
        }

        if !envelope.data.is_consistent() {
            warn!(
                path,
                count = envelope.data.count,
                results = envelope.data.results.len(),
                total = envelope.data.total,
                "container pagination does not match its results"
            );
        }

        debug!(path, http_status = status.as_u16(), count = envelope.data.results.len(), "request completed");

        Ok(ApiResponse {
            envelope,
            status: status.as_u16(),
            headers,
        })
    }
}

/// Query keys owned by the authenticator.
const RESERVED_PARAMS: [&str; 3] = ["apikey", "hash", "ts"];

fn auth_pair_count(auth: &AuthParams) -> usize {
    1 + usize::from(auth.hash().is_some()) + usize::from(auth.timestamp().is_some())
}

/// Removes caller parameters that would shadow the leading `auth_pairs` auth
/// parameters.
fn strip_reserved_params(request: &mut Request, auth_pairs: usize) {
    let pairs: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
    let (auth, caller) = pairs.split_at(auth_pairs.min(pairs.len()));
    if !caller.iter().any(|(k, _)| RESERVED_PARAMS.contains(&k.as_str())) {
        return;
    }

    let kept: Vec<&(String, String)> = auth
        .iter()
        .chain(caller.iter().filter(|(k, _)| !RESERVED_PARAMS.contains(&k.as_str())))
        .collect();
    debug!(dropped = pairs.len() - kept.len(), "dropping caller parameters named like auth parameters");
    request.url_mut().query_pairs_mut().clear().extend_pairs(kept);
}

/// Error for a failure status whose body carried no usable error code.
fn status_error(status: StatusCode) -> ApiError {
    ApiError {
        code: ApiCode::Int(i64::from(status.as_u16())),
        message: status.canonical_reason().unwrap_or_default().to_string(),
        http_status: Some(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ClientSideAuth, ServerSideAuth};
    use serde_json::json;
    use std::collections::BTreeMap;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct MockAuth;

    impl Authenticator for MockAuth {
        fn produce(&self) -> AuthParams {
            AuthParams::server_side("a", "b", "c")
        }
    }

    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    struct Item {
        id: u64,
        name: String,
    }

    #[derive(Serialize)]
    struct ItemParams {
        #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
        order_by: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Arc::new(MockAuth), None).unwrap()
    }

    fn success_body() -> serde_json::Value {
        json!({
            "code": 200,
            "status": "Ok",
            "etag": "f0fbae65eb2f8f28bdeea0a29be8749a4e67acb3",
            "data": {
                "offset": 0, "limit": 20, "total": 2, "count": 2,
                "results": [{"id": 1, "name": "3-D Man"}, {"id": 2, "name": "A-Bomb (HAS)"}]
            }
        })
    }

    #[test]
    fn request_carries_auth_params_in_fixed_order() {
        let api = client("https://host/v1/public/");

        let req = api.request("", &()).unwrap();

        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(req.url().as_str(), "https://host/v1/public/?apikey=b&hash=c&ts=a");
    }

    #[test]
    fn entity_params_follow_auth_params() {
        let api = client(API_URL);
        let params = ItemParams {
            order_by: Some("-modified".into()),
            limit: Some(5),
        };

        let req = api.request("characters", &params).unwrap();

        assert_eq!(
            req.url().as_str(),
            "https://gateway.marvel.com/v1/public/characters?apikey=b&hash=c&ts=a&orderBy=-modified&limit=5"
        );
    }

    #[test]
    fn base_without_trailing_slash_keeps_last_segment() {
        let api = client("https://host/v1/public");

        let req = api.request("/comics/42", &()).unwrap();

        assert_eq!(req.url().path(), "/v1/public/comics/42");
    }

    #[test]
    fn auth_query_round_trip_is_field_exact() {
        let server_auth = ServerSideAuth::new("1234", "abcd").with_timestamper(|| "1".to_string());
        let api = ApiClient::new(API_URL, Arc::new(server_auth), None).unwrap();
        let pairs: BTreeMap<String, String> = api
            .request("characters", &())
            .unwrap()
            .url()
            .query_pairs()
            .into_owned()
            .collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs["apikey"], "1234");
        assert_eq!(pairs["ts"], "1");
        assert_eq!(pairs["hash"], "ffd275c5130566a2916217b101f26150");

        let api = ApiClient::new(API_URL, Arc::new(ClientSideAuth::new("1234")), None).unwrap();
        let req = api.request("characters", &()).unwrap();
        assert_eq!(req.url().query(), Some("apikey=1234"));
    }

    #[tokio::test]
    async fn success_body_yields_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/public/characters"))
            .and(query_param("apikey", "b"))
            .and(query_param("hash", "c"))
            .and(query_param("ts", "a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;
        let api = client(&format!("{}/v1/public/", server.uri()));

        let resp: ApiResponse<Item> = api.execute("characters", &()).await.unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.envelope.code, 200);
        assert_eq!(resp.envelope.data.count as usize, resp.results().len());
        assert_eq!(resp.results()[1].name, "A-Bomb (HAS)");
    }

    #[tokio::test]
    async fn usage_error_in_ok_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/public/characters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 409,
                "status": "You must provide a valid ordering parameter."
            })))
            .mount(&server)
            .await;
        let api = client(&format!("{}/v1/public/", server.uri()));
        let params = ItemParams {
            order_by: Some("superpower".into()),
            limit: None,
        };

        let err = api.execute::<Item, _>("characters", &params).await.unwrap_err();

        let api_err = err.api_error().expect("semantic error expected");
        assert_eq!(api_err.code, ApiCode::Int(409));
        assert_eq!(api_err.http_status, Some(200));
        assert_eq!(
            err.to_string(),
            "marvel: 409 You must provide a valid ordering parameter."
        );
    }

    #[tokio::test]
    async fn auth_error_with_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "InvalidCredentials",
                "message": "That hash, timestamp and key combination is invalid."
            })))
            .mount(&server)
            .await;
        let api = client(&format!("{}/v1/public/", server.uri()));

        let err = api.execute::<Item, _>("comics", &()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "marvel: InvalidCredentials That hash, timestamp and key combination is invalid."
        );
        assert_eq!(err.api_error().unwrap().http_status, Some(401));
    }

    #[tokio::test]
    async fn non_json_failure_page_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;
        let api = client(&format!("{}/v1/public/", server.uri()));

        let err = api.execute::<Item, _>("comics", &()).await.unwrap_err();

        assert_eq!(err.to_string(), "marvel: 503 Service Unavailable");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;
        let api = client(&format!("{}/v1/public/", server.uri()));

        let err = api.execute::<Item, _>("comics", &()).await.unwrap_err();

        assert!(matches!(err, MarvelError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = client("http://127.0.0.1:9/v1/public/");

        let err = api.execute::<Item, _>("comics", &()).await.unwrap_err();

        assert!(matches!(err, MarvelError::Transport(_)));
    }

    #[test]
    fn paths_cannot_leave_the_base() {
        let api = client("https://host/v1/public/");

        for path in ["https://evil.example/x", "../x", "characters/../../x"] {
            let err = api.request(path, &()).unwrap_err();
            assert!(matches!(err, MarvelError::PathEscape(ref p) if p == path), "{}", path);
        }
        assert!(api.request("characters/../comics", &()).is_ok());
    }

    #[derive(Serialize)]
    struct Shadowing {
        apikey: &'static str,
        ts: &'static str,
        limit: u32,
    }

    #[test]
    fn caller_params_cannot_shadow_auth() {
        let api = client("https://host/v1/public/");
        let params = Shadowing {
            apikey: "evil",
            ts: "0",
            limit: 5,
        };

        let req = api.request("characters", &params).unwrap();

        assert_eq!(req.url().as_str(), "https://host/v1/public/characters?apikey=b&hash=c&ts=a&limit=5");

        let api = ApiClient::new("https://host/v1/public/", Arc::new(ClientSideAuth::new("pub")), None).unwrap();
        let req = api.request("characters", &params).unwrap();
        assert_eq!(req.url().query(), Some("apikey=pub&limit=5"));
    }

    #[tokio::test]
    async fn zero_or_missing_code_is_success() {
        for body in [
            json!({"data": {"offset": 0, "limit": 20, "total": 1, "count": 1, "results": [{"id": 1, "name": "3-D Man"}]}}),
            json!({"code": 0, "data": {"offset": 0, "limit": 20, "total": 1, "count": 1, "results": [{"id": 1, "name": "3-D Man"}]}}),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/public/characters"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
            let api = client(&format!("{}/v1/public/", server.uri()));

            let resp: ApiResponse<Item> = api.execute("characters", &()).await.unwrap();

            assert!(!resp.results().is_empty());
            assert_eq!(resp.envelope.data.count as usize, resp.results().len());
            assert_eq!(resp.envelope.code, 0);
        }
    }

    #[tokio::test]
    async fn identical_calls_yield_identical_envelopes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(2)
            .mount(&server)
            .await;
        let api = client(&format!("{}/v1/public/", server.uri()));

        let first: ApiResponse<Item> = api.execute("characters", &()).await.unwrap();
        let second: ApiResponse<Item> = api.execute("characters", &()).await.unwrap();

        assert_eq!(first.envelope, second.envelope);
    }
}
