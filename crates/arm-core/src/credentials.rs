//! Token credential seam for the transport.
//!
//! Real authentication flows (device code, managed identity, client secret)
//! live outside this SDK. The transport only needs something that can hand
//! it a bearer token; [`TokenCredential`] is that seam, and
//! [`StaticTokenCredential`] covers tests and pre-acquired tokens.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Result;

/// Source of bearer tokens for the `Authorization` header.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Produce a token valid for the management endpoint.
    async fn token(&self) -> Result<SecretString>;
}

/// Credential wrapping a pre-acquired token.
pub struct StaticTokenCredential {
    token: SecretString,
}

impl StaticTokenCredential {
    /// Wrap an existing token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn token(&self) -> Result<SecretString> {
        Ok(SecretString::from(self.token.expose_secret().to_owned()))
    }
}
