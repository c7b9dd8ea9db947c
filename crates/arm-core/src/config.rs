//! Configuration for resource-manager clients.
//!
//! [`ArmConfig`] is the serializable form of a client setup, suitable for
//! loading from a file or environment layer, validated before it is turned
//! into an [`ArmClient`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::client::{
    ArmClient, ClientConfig, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_TIMEOUT_SECS, MANAGEMENT_ENDPOINT,
};
use crate::credentials::TokenCredential;
use crate::error::{Error, Result};
use crate::ids::SubscriptionId;

/// Configuration for connecting to a resource-manager endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ArmConfig {
    /// Base URL of the management endpoint
    #[validate(url)]
    #[serde(default = "default_management_url")]
    pub management_url: String,

    /// Subscription all requests are scoped to
    pub subscription_id: SubscriptionId,

    /// Language for error messages, sent as `accept-language`
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 600))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_management_url() -> String {
    MANAGEMENT_ENDPOINT.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

impl ArmConfig {
    /// Create a configuration for the given subscription with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn new(subscription_id: SubscriptionId) -> Result<Self> {
        let config = Self {
            management_url: default_management_url(),
            subscription_id,
            accept_language: default_accept_language(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        };
        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
        Ok(config)
    }

    /// Override the management endpoint.
    #[must_use]
    pub fn with_management_url(mut self, url: impl Into<String>) -> Self {
        self.management_url = url.into();
        self
    }

    /// Override the error-message language.
    #[must_use]
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = language.into();
        self
    }

    /// Override the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate and build an unauthenticated client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails and
    /// [`Error::InvalidEndpoint`] if the management URL cannot be parsed.
    pub fn build_client(&self) -> Result<ArmClient> {
        self.builder()?.build()
    }

    /// Validate and build a client that authenticates with the credential.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::build_client`].
    pub fn build_client_with(&self, credential: Arc<dyn TokenCredential>) -> Result<ArmClient> {
        self.builder()?.with_credential(credential).build()
    }

    fn builder(&self) -> Result<crate::client::ArmClientBuilder> {
        self.validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
        let http = ClientConfig::new()
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs));
        Ok(ArmClient::builder(self.subscription_id)
            .with_endpoint(self.management_url.clone())
            .with_accept_language(self.accept_language.clone())
            .with_http_config(http))
    }
}
