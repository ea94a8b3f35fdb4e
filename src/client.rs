//! Rollbar API client.
//!
//! Low-level HTTP client that handles endpoint URL assembly, query-parameter
//! authentication, and raw request execution. Higher-level operations are
//! implemented via traits on entity types.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{redirect, Client, Method};
use url::{form_urlencoded, Url};

use crate::error::{Result, RollbarError};

const DEFAULT_API_URL: &str = "https://api.rollbar.com/api/1";
const USER_AGENT: &str = concat!("rollbar-api/", env!("CARGO_PKG_VERSION"));

/// Resolved connection parameters for a [`RollbarClient`].
///
/// Built once during client construction from the default API URL plus any
/// [`ClientOption`]s, and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Access token sent as the `access_token` query parameter on GET and
    /// DELETE requests.
    pub access_token: String,
    /// URL scheme, `https` by default.
    pub scheme: String,
    /// Host, including the port when one is present.
    pub host: String,
    /// Path prefix joined ahead of every endpoint path, `/api/1` by default.
    pub base_path: String,
    /// Optional cap on pages fetched per aggregated listing. `None` keeps
    /// the documented contract: iterate until an empty page.
    pub page_limit: Option<u32>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("base_path", &self.base_path)
            .field("page_limit", &self.page_limit)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Resolve the default configuration for the given access token.
    fn resolve(access_token: &str) -> Result<Self> {
        // Defensive: the constant is well-formed, but a parse failure must
        // surface as a configuration error rather than a panic.
        let base = Url::parse(DEFAULT_API_URL).map_err(|e| {
            RollbarError::Configuration(format!("malformed base URL {DEFAULT_API_URL}: {e}"))
        })?;

        Ok(Self {
            access_token: access_token.to_string(),
            scheme: base.scheme().to_string(),
            host: host_with_port(&base),
            base_path: base.path().to_string(),
            page_limit: None,
        })
    }
}

/// A deferred configuration mutation applied during client construction.
///
/// Options are applied in the order supplied; later options override fields
/// set by earlier ones. The first failing option aborts construction and its
/// error is returned unchanged.
pub type ClientOption = Box<dyn FnOnce(&mut ClientConfig) -> Result<()>>;

/// Override the URL scheme.
pub fn with_scheme(scheme: impl Into<String>) -> ClientOption {
    let scheme = scheme.into();
    Box::new(move |config| {
        config.scheme = scheme;
        Ok(())
    })
}

/// Override the host (may include a port).
pub fn with_host(host: impl Into<String>) -> ClientOption {
    let host = host.into();
    Box::new(move |config| {
        config.host = host;
        Ok(())
    })
}

/// Override the path prefix joined ahead of every endpoint path.
pub fn with_base_path(base_path: impl Into<String>) -> ClientOption {
    let base_path = base_path.into();
    Box::new(move |config| {
        config.base_path = base_path;
        Ok(())
    })
}

/// Override the access token.
pub fn with_access_token(access_token: impl Into<String>) -> ClientOption {
    let access_token = access_token.into();
    Box::new(move |config| {
        config.access_token = access_token;
        Ok(())
    })
}

/// Point the client at a different API endpoint, splitting the URL into
/// scheme, host, and base path.
///
/// This is the option tests use to target a local stand-in server:
///
/// ```no_run
/// use rollbar_api::{client_options, RollbarClient};
///
/// # fn example() -> rollbar_api::Result<()> {
/// let client = RollbarClient::with_options(
///     "test-token",
///     [client_options::with_base_url("http://127.0.0.1:8080")],
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn with_base_url(url: impl Into<String>) -> ClientOption {
    let url = url.into();
    Box::new(move |config| {
        let parsed = Url::parse(&url)
            .map_err(|e| RollbarError::Configuration(format!("invalid base URL {url}: {e}")))?;
        config.scheme = parsed.scheme().to_string();
        config.host = host_with_port(&parsed);
        config.base_path = match parsed.path() {
            "/" => String::new(),
            path => path.trim_end_matches('/').to_string(),
        };
        Ok(())
    })
}

/// Cap the number of pages fetched by aggregated list operations.
///
/// Off by default: the Rollbar list protocol terminates only on an empty
/// page, and a misbehaving endpoint that never returns one would otherwise
/// iterate unboundedly.
pub fn with_page_limit(limit: u32) -> ClientOption {
    Box::new(move |config| {
        config.page_limit = Some(limit);
        Ok(())
    })
}

fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Low-level Rollbar API client.
///
/// Handles URL construction, query-parameter authentication, and raw HTTP
/// requests. Entity-specific operations are implemented via the `Get`,
/// `List`, `Create`, and `Delete` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and the same immutable configuration, so a client may be
/// shared freely across tasks.
///
/// # Example
///
/// ```no_run
/// use rollbar_api::RollbarClient;
///
/// # fn example() -> rollbar_api::Result<()> {
/// // Create from environment variables
/// let client = RollbarClient::from_env()?;
///
/// // Or configure manually
/// let client = RollbarClient::new("your-access-token")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RollbarClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for RollbarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollbarClient")
            .field("scheme", &self.config.scheme)
            .field("host", &self.config.host)
            .field("base_path", &self.config.base_path)
            .finish_non_exhaustive()
    }
}

impl RollbarClient {
    /// Create a client for the default Rollbar API endpoint.
    ///
    /// The token is treated as opaque; no format validation is performed.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in base URL fails to parse (defensive)
    /// or the HTTP client cannot be constructed.
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_options(access_token, [])
    }

    /// Create a client, applying configuration options in order.
    ///
    /// Later options override fields set by earlier ones. No network I/O
    /// happens at construction time.
    ///
    /// # Errors
    ///
    /// Returns the first failing option's error unchanged; remaining options
    /// are not applied.
    pub fn with_options(
        access_token: &str,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self> {
        let mut config = ClientConfig::resolve(access_token)?;

        for option in options {
            option(&mut config)?;
        }

        // Redirects are not followed: only an exact 200 counts as success,
        // so 3xx statuses must surface to the caller as-is.
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(RollbarError::Transport)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create a client from environment variables.
    ///
    /// Uses `ROLLBAR_ACCESS_TOKEN` for authentication and optionally
    /// `ROLLBAR_API_URL` for the base URL (defaults to
    /// `https://api.rollbar.com/api/1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `ROLLBAR_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("ROLLBAR_ACCESS_TOKEN").map_err(|_| {
            RollbarError::Configuration(
                "ROLLBAR_ACCESS_TOKEN environment variable not set".to_string(),
            )
        })?;

        match env::var("ROLLBAR_API_URL") {
            Ok(base_url) => Self::with_options(&token, [with_base_url(base_url)]),
            Err(_) => Self::new(&token),
        }
    }

    /// Get the resolved client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Assemble a fully-qualified endpoint URL.
    ///
    /// Joins the base path with the percent-encoded path segments using `/`,
    /// then appends the query pairs (plus the access token when
    /// `with_access_token` is set) form-url-encoded in sorted key order, so
    /// the same inputs always produce the same URL string. Pure string
    /// manipulation; always succeeds.
    pub fn build_url(
        &self,
        with_access_token: bool,
        query: &BTreeMap<String, String>,
        path_segments: &[&str],
    ) -> String {
        let mut pairs: BTreeMap<&str, &str> = query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        if with_access_token {
            pairs.insert("access_token", &self.config.access_token);
        }

        let mut path = self.config.base_path.clone();
        for segment in path_segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }

        let mut url = format!("{}://{}{}", self.config.scheme, self.config.host, path);
        if !pairs.is_empty() {
            url.push('?');
            url.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish(),
            );
        }
        url
    }

    /// Make an authenticated GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path_segments: &[&str]) -> Result<Vec<u8>> {
        self.get_with_query(&BTreeMap::new(), path_segments).await
    }

    /// Make an authenticated GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query(
        &self,
        query: &BTreeMap<String, String>,
        path_segments: &[&str],
    ) -> Result<Vec<u8>> {
        let url = self.build_url(true, query, path_segments);
        self.execute(Method::GET, &url, None).await
    }

    /// Make a POST request with a raw body.
    ///
    /// POST requests do not carry the access token as a query parameter;
    /// the body is expected to embed it where the endpoint requires one.
    #[tracing::instrument(skip(self, body))]
    pub async fn post(&self, body: Vec<u8>, path_segments: &[&str]) -> Result<Vec<u8>> {
        let url = self.build_url(false, &BTreeMap::new(), path_segments);
        self.execute(Method::POST, &url, Some(body)).await
    }

    /// Make an authenticated DELETE request, discarding the success payload.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path_segments: &[&str]) -> Result<()> {
        let url = self.build_url(true, &BTreeMap::new(), path_segments);
        self.execute(Method::DELETE, &url, None).await?;
        Ok(())
    }

    /// Execute one HTTP exchange and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`RollbarError::Transport`] when the request cannot be built
    /// or the exchange fails, and [`RollbarError::UnexpectedStatus`] for any
    /// response status other than 200.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(RollbarError::Transport)?;
        let status = response.status();

        // Read the body before the status check so the connection is drained
        // and released on every exit path.
        let bytes = response.bytes().await.map_err(RollbarError::Transport)?;

        if status.as_u16() != 200 {
            return Err(RollbarError::UnexpectedStatus {
                code: status.as_u16(),
            });
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_api_url() {
        let client = RollbarClient::new("test-token").unwrap();
        let config = client.config();
        assert_eq!(config.scheme, "https");
        assert_eq!(config.host, "api.rollbar.com");
        assert_eq!(config.base_path, "/api/1");
        assert_eq!(config.access_token, "test-token");
        assert_eq!(config.page_limit, None);
    }

    #[test]
    fn no_options_matches_explicit_defaults() {
        let implicit = RollbarClient::new("test-token").unwrap();
        let explicit = RollbarClient::with_options(
            "test-token",
            [
                with_scheme("https"),
                with_host("api.rollbar.com"),
                with_base_path("/api/1"),
            ],
        )
        .unwrap();

        assert_eq!(implicit.config(), explicit.config());
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let client = RollbarClient::with_options(
            "test-token",
            [with_host("first.example.com"), with_host("second.example.com")],
        )
        .unwrap();
        assert_eq!(client.config().host, "second.example.com");

        let reversed = RollbarClient::with_options(
            "test-token",
            [with_host("second.example.com"), with_host("first.example.com")],
        )
        .unwrap();
        assert_eq!(reversed.config().host, "first.example.com");
    }

    #[test]
    fn failing_option_short_circuits() {
        let failing: ClientOption =
            Box::new(|_| Err(RollbarError::Configuration("boom".to_string())));
        let unreachable: ClientOption = Box::new(|_| panic!("applied after a failing option"));

        let err = RollbarClient::with_options("test-token", [failing, unreachable]).unwrap_err();
        assert!(matches!(err, RollbarError::Configuration(msg) if msg == "boom"));
    }

    #[test]
    fn with_base_url_splits_components() {
        let client = RollbarClient::with_options(
            "test-token",
            [with_base_url("http://127.0.0.1:8080")],
        )
        .unwrap();

        let config = client.config();
        assert_eq!(config.scheme, "http");
        assert_eq!(config.host, "127.0.0.1:8080");
        assert_eq!(config.base_path, "");
    }

    #[test]
    fn with_base_url_keeps_path_prefix() {
        let client = RollbarClient::with_options(
            "test-token",
            [with_base_url("https://rollbar.internal/proxy/api/1/")],
        )
        .unwrap();

        assert_eq!(client.config().base_path, "/proxy/api/1");
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let err = RollbarClient::with_options("test-token", [with_base_url("not a url")])
            .unwrap_err();
        assert!(matches!(err, RollbarError::Configuration(_)));
    }

    #[test]
    fn access_token_option_overrides_constructor_token() {
        let client =
            RollbarClient::with_options("original", [with_access_token("replacement")]).unwrap();
        assert_eq!(client.config().access_token, "replacement");
    }

    #[test]
    fn build_url_joins_base_path_and_segments() {
        let client = RollbarClient::new("test-token").unwrap();
        let url = client.build_url(false, &BTreeMap::new(), &["team", "42", "invites"]);
        assert_eq!(url, "https://api.rollbar.com/api/1/team/42/invites");
    }

    #[test]
    fn build_url_appends_access_token_only_when_requested() {
        let client = RollbarClient::new("secret").unwrap();

        let authed = client.build_url(true, &BTreeMap::new(), &["projects"]);
        assert_eq!(
            authed,
            "https://api.rollbar.com/api/1/projects?access_token=secret"
        );

        let anonymous = client.build_url(false, &BTreeMap::new(), &["projects"]);
        assert!(!anonymous.contains("access_token"));
        assert!(!anonymous.contains('?'));
    }

    #[test]
    fn build_url_encodes_query_deterministically() {
        let client = RollbarClient::new("token").unwrap();
        let mut query = BTreeMap::new();
        query.insert("page".to_string(), "3".to_string());
        query.insert("filter".to_string(), "a b&c".to_string());

        let url = client.build_url(true, &query, &["team", "7", "invites"]);
        // Sorted key order: access_token, filter, page.
        assert_eq!(
            url,
            "https://api.rollbar.com/api/1/team/7/invites?access_token=token&filter=a+b%26c&page=3"
        );
    }

    #[test]
    fn query_encoding_round_trips() {
        let client = RollbarClient::new("token").unwrap();
        let mut query = BTreeMap::new();
        query.insert("page".to_string(), "1".to_string());
        query.insert("email".to_string(), "dev+oncall@example.com".to_string());
        query.insert("note".to_string(), "spaces & symbols".to_string());

        let url = client.build_url(true, &query, &["projects"]);
        let raw_query = url.split_once('?').unwrap().1;

        let decoded: BTreeMap<String, String> = form_urlencoded::parse(raw_query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut expected = query;
        expected.insert("access_token".to_string(), "token".to_string());
        assert_eq!(decoded, expected);
    }

    #[test]
    fn build_url_escapes_path_segments() {
        let client = RollbarClient::new("token").unwrap();
        let url = client.build_url(false, &BTreeMap::new(), &["team", "a b", "invites"]);
        assert_eq!(url, "https://api.rollbar.com/api/1/team/a%20b/invites");
    }

    #[test]
    fn debug_output_hides_access_token() {
        let client = RollbarClient::new("very-secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("RollbarClient"));
        assert!(debug.contains("api.rollbar.com"));
        assert!(!debug.contains("very-secret-token"));

        let config_debug = format!("{:?}", client.config());
        assert!(!config_debug.contains("very-secret-token"));
    }
}
