//! # Marvel Client
//!
//! The entry point of the library. A [`Client`] owns one request pipeline and
//! exposes a typed service per entity kind on top of it:
//!
//! ```no_run
//! use lib_marvel::{Client, ServerSideAuth};
//!
//! # async fn run() -> Result<(), lib_marvel::MarvelError> {
//! let client = Client::new(ServerSideAuth::new("public", "private"), None);
//! let spidey = client.characters.get(1009610).await?;
//! let comics = client.characters.comics(spidey.id, &Default::default()).await?;
//! # Ok(())
//! # }
//! ```

use reqwest::Request;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::auth::Authenticator;
use crate::errors::MarvelError;
use crate::retrieve::{ApiClient, ApiResponse, API_URL};
use crate::services::{Character, Comic, Creator, EntityService, Event, Series, Story};

#[cfg(feature = "configs")]
use crate::auth::{ClientSideAuth, ServerSideAuth};
#[cfg(feature = "configs")]
use crate::configs::MarvelConfig;
#[cfg(feature = "configs")]
use tracing::debug;

/// # Client
///
/// Typed access to the public API. All services share the same base URL,
/// authenticator and HTTP transport. Cloning is cheap.
#[derive(Clone)]
pub struct Client {
    api: Arc<ApiClient>,
    /// `/characters` endpoints.
    pub characters: EntityService<Character>,
    /// `/comics` endpoints.
    pub comics: EntityService<Comic>,
    /// `/creators` endpoints.
    pub creators: EntityService<Creator>,
    /// `/events` endpoints.
    pub events: EntityService<Event>,
    /// `/series` endpoints.
    pub series: EntityService<Series>,
    /// `/stories` endpoints.
    pub stories: EntityService<Story>,
}

impl Client {
    /// Creates a client against the production API.
    ///
    /// # Arguments
    /// * `authenticator` - Produces the auth parameters of every request.
    /// * `transport` - HTTP client to send requests with. `None` uses a
    ///   default `reqwest` client without middleware.
    pub fn new<A>(authenticator: A, transport: Option<ClientWithMiddleware>) -> Self
    where
        A: Authenticator + 'static,
    {
        let base_url = Url::parse(API_URL).expect("API_URL is a valid absolute URL");
        Self::from_api(ApiClient::from_parts(base_url, Arc::new(authenticator), transport))
    }

    /// Creates a client against an arbitrary base URL, e.g. a mock server or
    /// a caching proxy. A missing trailing slash is added.
    ///
    /// # Errors
    /// [`MarvelError::Url`] when `base_url` is not an absolute URL.
    pub fn with_base_url<A>(
        authenticator: A,
        transport: Option<ClientWithMiddleware>,
        base_url: &str,
    ) -> Result<Self, MarvelError>
    where
        A: Authenticator + 'static,
    {
        let api = ApiClient::new(base_url, Arc::new(authenticator), transport)?;
        Ok(Self::from_api(api))
    }

    /// Creates a client from loaded configuration.
    ///
    /// Server-side authentication is used when a private key is configured,
    /// client-side authentication otherwise. The configured timeout applies to
    /// whole requests.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be built or the API URL is invalid.
    #[cfg(feature = "configs")]
    pub fn from_config(config: &MarvelConfig) -> Result<Self, MarvelError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let transport = reqwest_middleware::ClientBuilder::new(http).build();

        let authenticator: Arc<dyn Authenticator> = match &config.private_key {
            Some(private_key) => Arc::new(ServerSideAuth::new(&config.public_key, private_key)),
            None => Arc::new(ClientSideAuth::new(&config.public_key)),
        };
        debug!(
            api_url = %config.api_url,
            server_side = config.private_key.is_some(),
            "creating client from configuration"
        );

        let api = ApiClient::new(&config.api_url, authenticator, Some(transport))?;
        Ok(Self::from_api(api))
    }

    fn from_api(api: ApiClient) -> Self {
        let api = Arc::new(api);
        Self {
            characters: EntityService::new(Arc::clone(&api)),
            comics: EntityService::new(Arc::clone(&api)),
            creators: EntityService::new(Arc::clone(&api)),
            events: EntityService::new(Arc::clone(&api)),
            series: EntityService::new(Arc::clone(&api)),
            stories: EntityService::new(Arc::clone(&api)),
            api,
        }
    }

    /// The base URL all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        self.api.base_url()
    }

    /// Builds an authenticated GET request for `path` without sending it.
    ///
    /// Useful for inspecting the exact URL, or for sending through another
    /// transport.
    pub fn request<P>(&self, path: &str, params: &P) -> Result<Request, MarvelError>
    where
        P: Serialize + ?Sized,
    {
        self.api.request(path, params)
    }

    /// Sends an authenticated GET request for `path` and decodes the envelope
    /// into results of type `T`. For endpoints without a dedicated service.
    pub async fn execute<T, P>(&self, path: &str, params: &P) -> Result<ApiResponse<T>, MarvelError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.api.execute(path, params).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.api.base_url().as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthParams, ClientSideAuth, ServerSideAuth};
    use crate::services::{CharacterParams, SeriesParams};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct MockAuth;

    impl Authenticator for MockAuth {
        fn produce(&self) -> AuthParams {
            AuthParams::server_side("a", "b", "c")
        }
    }

    fn spidey_envelope() -> serde_json::Value {
        json!({
            "code": 200,
            "status": "Ok",
            "copyright": "© 2016 MARVEL",
            "etag": "f0fbae65eb2f8f28bdeea0a29be8749a4e67acb3",
            "data": {
                "offset": 0, "limit": 20, "total": 1, "count": 1,
                "results": [{"id": 1009610, "name": "Spider-Man", "modified": "2016-08-17T17:46:57-0400"}]
            }
        })
    }

    #[test]
    fn new_targets_production_api() {
        let client = Client::new(ClientSideAuth::new("pub"), None);

        assert_eq!(client.base_url().as_str(), API_URL);
    }

    #[test]
    fn request_has_exact_url() {
        let client = Client::new(MockAuth, None);

        let req = client.request("", &()).unwrap();

        assert_eq!(
            req.url().as_str(),
            "https://gateway.marvel.com/v1/public/?apikey=b&hash=c&ts=a"
        );
    }

    #[test]
    fn request_appends_entity_params_after_auth() {
        let client = Client::with_base_url(MockAuth, None, "https://host/v1/public").unwrap();
        let params = CharacterParams {
            name_starts_with: Some("Spi".into()),
            series: vec![1, 2],
            ..CharacterParams::default()
        };

        let req = client.request("characters", &params).unwrap();

        assert_eq!(
            req.url().as_str(),
            "https://host/v1/public/characters?apikey=b&hash=c&ts=a&nameStartsWith=Spi&series=1%2C2"
        );
    }

    #[test]
    fn server_side_auth_is_fresh_per_request() {
        let client = Client::new(
            ServerSideAuth::new("1234", "abcd").with_timestamper({
                let counter = std::sync::atomic::AtomicU64::new(0);
                move || {
                    counter
                        .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
                        .to_string()
                }
            }),
            None,
        );

        let first = client.request("characters", &()).unwrap();
        let second = client.request("characters", &()).unwrap();

        assert!(first.url().as_str().contains("ts=0"));
        assert!(second.url().as_str().contains("ts=1"));
        assert_ne!(first.url(), second.url());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Client::with_base_url(MockAuth, None, "not a url").unwrap_err();

        assert!(matches!(err, MarvelError::Url(_)));
    }

    #[tokio::test]
    async fn services_share_the_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/public/characters/1009610"))
            .and(query_param("apikey", "b"))
            .and(query_param("hash", "c"))
            .and(query_param("ts", "a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(spidey_envelope()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/public/series"))
            .and(query_param("titleStartsWith", "Spider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "status": "Ok",
                "data": {"offset": 0, "limit": 20, "total": 0, "count": 0, "results": []}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = Client::with_base_url(MockAuth, None, &format!("{}/v1/public", server.uri())).unwrap();

        let spidey = client.characters.get(1009610).await.unwrap();
        let series = client
            .series
            .all(&SeriesParams {
                title_starts_with: Some("Spider".into()),
                ..SeriesParams::default()
            })
            .await
            .unwrap();

        assert_eq!(spidey.name, "Spider-Man");
        assert!(spidey.modified.is_set());
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn execute_decodes_arbitrary_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/public/characters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(spidey_envelope()))
            .mount(&server)
            .await;
        let client = Client::with_base_url(MockAuth, None, &format!("{}/v1/public/", server.uri())).unwrap();

        let resp: ApiResponse<serde_json::Value> = client.execute("/characters", &()).await.unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.envelope.etag, "f0fbae65eb2f8f28bdeea0a29be8749a4e67acb3");
        assert_eq!(resp.results()[0]["name"], "Spider-Man");
    }

    #[cfg(feature = "configs")]
    #[test]
    fn from_config_picks_auth_mode() {
        let mut config = MarvelConfig {
            public_key: "pub".into(),
            private_key: None,
            api_url: "https://example.test/v1/public/".into(),
            timeout: std::time::Duration::from_secs(5),
        };

        let client_side = Client::from_config(&config).unwrap();
        let url = client_side.request("comics", &()).unwrap().url().to_string();
        assert_eq!(url, "https://example.test/v1/public/comics?apikey=pub");

        config.private_key = Some("priv".into());
        let server_side = Client::from_config(&config).unwrap();
        let url = server_side.request("comics", &()).unwrap().url().to_string();
        assert!(url.contains("apikey=pub&hash="));
        assert!(url.contains("&ts="));
    }
}
