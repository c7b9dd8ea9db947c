//! Request descriptions and parameter helpers.
//!
//! Every operation in a provider crate reduces to a [`RequestSpec`]: a
//! method, a templated ARM resource path, query pairs, and an optional JSON
//! body. Required-parameter checks happen here, before any I/O.

use reqwest::Method;
use serde::Serialize;
use std::fmt::Display;

use crate::error::{Error, Result};
use crate::ids::SubscriptionId;

/// Reject an absent or empty required parameter before dispatch.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the parameter when the value is
/// empty or whitespace-only.
pub fn required_arg(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!(
            "parameter `{name}` is required and cannot be empty"
        )));
    }
    Ok(())
}

/// Builder for assembling URL query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Builder for ARM resource paths of the shape
/// `subscriptions/{sub}/resourceGroups/{rg}/providers/{namespace}/{type}/{name}/...`.
#[derive(Debug, Clone)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Start a path under the given subscription.
    #[must_use]
    pub fn subscription(subscription_id: SubscriptionId) -> Self {
        Self {
            segments: vec!["subscriptions".into(), subscription_id.to_string()],
        }
    }

    /// Scope to a resource group.
    #[must_use]
    pub fn resource_group(mut self, name: &str) -> Self {
        self.segments.push("resourceGroups".into());
        self.segments.push(name.to_string());
        self
    }

    /// Scope to a resource provider namespace (e.g. `Microsoft.Web`).
    #[must_use]
    pub fn provider(mut self, namespace: &str) -> Self {
        self.segments.push("providers".into());
        self.segments.push(namespace.to_string());
        self
    }

    /// Append a literal path segment (resource type, name, or action).
    #[must_use]
    pub fn segment(mut self, part: &str) -> Self {
        self.segments.push(part.to_string());
        self
    }

    /// Render the relative path (no leading slash).
    #[must_use]
    pub fn build(self) -> String {
        self.segments.join("/")
    }
}

/// A fully described REST call, ready for the shared client to execute.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Relative ARM path, as produced by [`ResourcePath::build`].
    pub path: String,
    /// Query pairs in addition to the mandatory `api-version`.
    pub query: Vec<(&'static str, String)>,
    /// Per-call api-version (every ARM endpoint requires one).
    pub api_version: String,
    /// Optional JSON body for create/update calls.
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    /// Describe a call with no query parameters or body.
    #[must_use]
    pub fn new(method: Method, path: String, api_version: &str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            api_version: api_version.to_string(),
            body: None,
        }
    }

    /// Attach query pairs.
    #[must_use]
    pub fn with_query(mut self, params: QueryParams) -> Self {
        self.query = params.into_pairs();
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn with_body<T>(mut self, body: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body).map_err(|err| {
            Error::InvalidArgument(format!("request body failed to serialize: {err}"))
        })?);
        Ok(self)
    }
}
