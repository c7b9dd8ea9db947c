//! The shared ARM client context and transport.
//!
//! [`ArmClient`] holds the pieces every operation needs: the management
//! endpoint, the subscription id, the accept-language for localized error
//! messages, and the HTTP client. It is immutable after construction and
//! cheap to clone, so operations clients can share one freely across tasks.
//!
//! The client performs each exchange exactly once. Retry and backoff are a
//! transport concern outside this SDK.

use reqwest::{ClientBuilder, Method};
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::credentials::TokenCredential;
use crate::error::{Error, Result};
use crate::ids::SubscriptionId;
use crate::request::RequestSpec;

/// Public cloud management endpoint.
pub const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Default accept-language attached to every request.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// Connection pool settings

/// Default idle timeout for pooled connections.
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const USER_AGENT: &str = concat!("arm-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP transport configuration.
///
/// Timeouts and pooling only. There is intentionally no retry policy here:
/// failed exchanges surface to the caller unchanged.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection establishment timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ArmClient`].
pub struct ArmClientBuilder {
    endpoint: String,
    subscription_id: SubscriptionId,
    accept_language: String,
    http_config: ClientConfig,
    credential: Option<Arc<dyn TokenCredential>>,
}

impl ArmClientBuilder {
    /// Create a builder for the given subscription.
    #[must_use]
    pub fn new(subscription_id: SubscriptionId) -> Self {
        Self {
            endpoint: MANAGEMENT_ENDPOINT.to_string(),
            subscription_id,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            http_config: ClientConfig::new(),
            credential: None,
        }
    }

    /// Override the management endpoint (sovereign clouds, mock servers).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the accept-language for localized service error messages.
    #[must_use]
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = language.into();
        self
    }

    /// Override the HTTP transport configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Attach a token credential. Requests go out unauthenticated without one.
    #[must_use]
    pub fn with_credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<ArmClient> {
        let mut endpoint = Url::parse(&self.endpoint).map_err(Error::from)?;
        // Ensure joins treat the endpoint as a directory.
        if !endpoint.path().ends_with('/') {
            endpoint.set_path(&format!("{}/", endpoint.path()));
        }

        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .user_agent(USER_AGENT)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host);

        if !self.http_config.enable_compression {
            builder = builder.no_gzip();
        }

        let http = builder
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(ArmClient {
            http,
            endpoint,
            subscription_id: self.subscription_id,
            accept_language: self.accept_language,
            credential: self.credential,
        })
    }
}

/// Immutable shared client context for ARM operations.
#[derive(Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: Url,
    subscription_id: SubscriptionId,
    accept_language: String,
    credential: Option<Arc<dyn TokenCredential>>,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .field("accept_language", &self.accept_language)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    /// Create a builder for the given subscription.
    #[must_use]
    pub fn builder(subscription_id: SubscriptionId) -> ArmClientBuilder {
        ArmClientBuilder::new(subscription_id)
    }

    /// The management endpoint in use.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The subscription every operation is scoped to.
    #[must_use]
    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// The accept-language attached to every request.
    #[must_use]
    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    /// Execute a described call against the management endpoint.
    ///
    /// Appends the mandatory `api-version` query parameter, the
    /// `accept-language` header, and a bearer token when a credential is
    /// configured. The exchange happens exactly once.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request cannot be sent. Status-code
    /// interpretation is the dispatcher's job, not this method's.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<reqwest::Response> {
        let url = self.endpoint.join(&spec.path).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid request path `{}`: {err}", spec.path))
        })?;

        let mut request = self
            .http
            .request(spec.method.clone(), url)
            .query(&[("api-version", spec.api_version.as_str())])
            .query(&spec.query);
        request = self.decorate(request).await?;
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        debug!(method = %spec.method, path = %spec.path, "ARM request");
        request.send().await.map_err(Error::from)
    }

    /// Execute a GET-style call against an absolute URL, used verbatim.
    ///
    /// Continuation links and long-running-operation poll URLs come back
    /// from the service fully formed (api-version included); they must not
    /// be re-derived or re-quoted.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request cannot be sent.
    pub async fn execute_url(&self, method: Method, url: &str) -> Result<reqwest::Response> {
        let url = Url::parse(url)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid absolute URL `{url}`: {err}")))?;

        let request = self.decorate(self.http.request(method.clone(), url)).await?;
        debug!(method = %method, "ARM request (absolute URL)");
        request.send().await.map_err(Error::from)
    }

    async fn decorate(&self, mut request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        request = request
            .header("Accept", "application/json")
            .header("accept-language", &self.accept_language);
        if let Some(credential) = &self.credential {
            let token = credential.token().await?;
            request = request.bearer_auth(token.expose_secret());
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticTokenCredential;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn subscription() -> SubscriptionId {
        SubscriptionId::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
    }

    #[test]
    fn builder_defaults_to_public_cloud() {
        let client = ArmClient::builder(subscription()).build().unwrap();
        assert_eq!(client.endpoint().as_str(), "https://management.azure.com/");
        assert_eq!(client.accept_language(), DEFAULT_ACCEPT_LANGUAGE);
    }

    #[test]
    fn builder_rejects_bad_endpoint() {
        let result = ArmClient::builder(subscription())
            .with_endpoint("not a url")
            .build();
        assert!(matches!(result.unwrap_err(), Error::InvalidEndpoint(_)));
    }

    #[test]
    fn client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(120))
            .with_pool_max_idle(4)
            .with_compression(false);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 4);
        assert!(!config.enable_compression);
    }

    #[tokio::test]
    async fn execute_attaches_api_version_and_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/subscriptions/550e8400-e29b-41d4-a716-446655440000/things"))
            .and(query_param("api-version", "2015-08-01"))
            .and(header("accept-language", "fr-FR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = ArmClient::builder(subscription())
            .with_endpoint(server.uri())
            .with_accept_language("fr-FR")
            .build()
            .unwrap();

        let spec = RequestSpec::new(
            Method::GET,
            format!("subscriptions/{}/things", subscription()),
            "2015-08-01",
        );
        let response = client.execute(&spec).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn execute_attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/secured"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ArmClient::builder(subscription())
            .with_endpoint(server.uri())
            .with_credential(Arc::new(StaticTokenCredential::new("test-token")))
            .build()
            .unwrap();

        let spec = RequestSpec::new(Method::GET, "secured".into(), "2015-08-01");
        let response = client.execute(&spec).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn execute_url_uses_link_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/paged/things"))
            .and(query_param("api-version", "2015-08-01"))
            .and(query_param("$skiptoken", "abc"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ArmClient::builder(subscription())
            .with_endpoint(server.uri())
            .build()
            .unwrap();

        let link = format!("{}/paged/things?api-version=2015-08-01&$skiptoken=abc", server.uri());
        let response = client.execute_url(Method::GET, &link).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }
}
