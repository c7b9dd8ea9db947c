//! Long-running operation polling.
//!
//! PUT, PATCH, POST and DELETE against resource-manager endpoints commonly
//! answer `202 Accepted` with a `Location` or `Azure-AsyncOperation` header
//! naming a status URL. [`LroOperation`] captures that initial exchange so a
//! caller can return immediately, and [`LroPoller`] drives the status URL to
//! a terminal provisioning state for callers that want the finished resource.
//!
//! Cancellation is dropping the future; no cancellation request is sent to
//! the service.

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::client::ArmClient;
use crate::dispatch::StatusMap;
use crate::error::{CloudError, Error, Result};

/// Default pause between polls when the service sends no `Retry-After`.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default bound on the total time spent polling a single operation.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(600);

/// Provisioning state reported by a resource or an operation-status body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProvisioningState {
    /// The service has accepted the operation but not started it.
    Accepted,
    /// The operation is running.
    InProgress,
    /// The operation finished successfully.
    Succeeded,
    /// The operation failed.
    Failed,
    /// The operation was canceled on the service side.
    Canceled,
    /// A state this crate does not recognize; treated as non-terminal.
    Other(String),
}

impl From<String> for ProvisioningState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Accepted" => Self::Accepted,
            "InProgress" | "Running" | "Creating" | "Updating" | "Deleting" => Self::InProgress,
            "Succeeded" | "Ready" | "OK" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Canceled" | "Cancelled" => Self::Canceled,
            _ => Self::Other(value),
        }
    }
}

impl ProvisioningState {
    /// Whether this state ends polling.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// The initial response of a long-running operation.
///
/// Holds the accepted status, the raw body if any, and the poll URL taken
/// from the response headers. `begin_*` client methods return this directly;
/// the plain variants hand it to an [`LroPoller`].
#[derive(Debug, Clone)]
pub struct LroOperation {
    status: u16,
    body: Option<serde_json::Value>,
    poll_url: Option<String>,
    retry_after: Option<Duration>,
}

impl LroOperation {
    /// Capture the initial response of a long-running operation.
    ///
    /// The status code is matched against `declared` the same way a
    /// single-shot endpoint would be.
    ///
    /// # Errors
    ///
    /// [`Error::Cloud`] for undeclared status codes, [`Error::Deserialize`]
    /// for declared codes with an unparsable body.
    pub async fn from_response(declared: StatusMap, response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let poll_url = header_string(&response, "azure-asyncoperation")
            .or_else(|| header_string(&response, "location"));
        let retry_after =
            header_string(&response, "retry-after").and_then(|v| parse_retry_after(&v));

        let bytes = response
            .bytes()
            .await
            .map_err(|err| Error::Http(format!("Failed to read response body: {err}")))?;

        if !declared.contains(status) {
            return Err(Error::cloud(status, &bytes));
        }

        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).map_err(|err| {
                Error::Deserialize(format!("body for status {status} did not match schema: {err}"))
            })?)
        };

        Ok(Self {
            status,
            body,
            poll_url,
            retry_after,
        })
    }

    /// The initial status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the service deferred the operation with `202 Accepted`.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.status == 202
    }

    /// The URL to poll for completion, if the service supplied one.
    #[must_use]
    pub fn poll_url(&self) -> Option<&str> {
        self.poll_url.as_deref()
    }

    /// Provisioning state carried in the initial body, if any.
    ///
    /// Looks at `properties.provisioningState` for resource envelopes and at
    /// a top-level `status` field for operation-status bodies.
    #[must_use]
    pub fn provisioning_state(&self) -> Option<ProvisioningState> {
        self.body.as_ref().and_then(provisioning_state_of)
    }

    /// Deserialize the initial body into the resource type.
    ///
    /// # Errors
    ///
    /// [`Error::Deserialize`] if the body is absent or does not match `T`.
    pub fn resource<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self
            .body
            .clone()
            .ok_or_else(|| Error::Deserialize("operation response carried no body".to_string()))?;
        serde_json::from_value(body)
            .map_err(|err| Error::Deserialize(format!("operation body did not match schema: {err}")))
    }
}

/// `Retry-After` is either delta-seconds or an HTTP-date.
fn parse_retry_after(value: &str) -> Option<Duration> {
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let when = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    when.signed_duration_since(chrono::Utc::now()).to_std().ok()
}

fn header_string(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

fn provisioning_state_of(body: &serde_json::Value) -> Option<ProvisioningState> {
    let raw = body
        .pointer("/properties/provisioningState")
        .or_else(|| body.get("status"))
        .and_then(serde_json::Value::as_str)?;
    Some(ProvisioningState::from(raw.to_owned()))
}

/// Polls a long-running operation to completion.
#[derive(Debug, Clone)]
pub struct LroPoller {
    client: ArmClient,
    interval: Duration,
    max_wait: Duration,
}

impl LroPoller {
    /// Create a poller with the default interval and wait bound.
    #[must_use]
    pub fn new(client: ArmClient) -> Self {
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    /// Override the pause between polls.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Override the bound on total polling time.
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Poll until the operation reaches a terminal state, then deserialize
    /// the final body into the resource type.
    ///
    /// An initial response that is already terminal (a 200 or 201 whose body
    /// reports `Succeeded`, or carries no state at all) resolves from the
    /// initial body without any polling. A 202, or a body still reporting a
    /// non-terminal state, enters the poll loop.
    ///
    /// # Errors
    ///
    /// [`Error::Cloud`] if the operation ends in `Failed` or `Canceled`,
    /// [`Error::PollingInterrupted`] if the wait bound expires or the
    /// service deferred without a poll URL.
    pub async fn wait_for_completion<T>(&self, operation: LroOperation) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.drive(operation).await?;
        serde_json::from_value(body).map_err(|err| {
            Error::Deserialize(format!("final operation body did not match schema: {err}"))
        })
    }

    /// Poll until the operation reaches a terminal state, discarding the
    /// final body. Used by delete-style operations with no result resource.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::wait_for_completion`].
    pub async fn wait_for_done(&self, operation: LroOperation) -> Result<()> {
        self.drive(operation).await.map(|_| ())
    }

    async fn drive(&self, operation: LroOperation) -> Result<serde_json::Value> {
        let initial_state = operation.provisioning_state();
        if let Some(ProvisioningState::Failed | ProvisioningState::Canceled) = initial_state {
            return Err(terminal_failure(operation.status, operation.body.as_ref()));
        }

        // A 202, or a 200/201 whose body reports a non-terminal state, is
        // still in flight and must be polled. Anything else is done.
        let pending =
            operation.accepted() || initial_state.as_ref().is_some_and(|s| !s.is_terminal());
        if !pending {
            return Ok(operation.body.unwrap_or(serde_json::Value::Null));
        }

        let poll_url = operation.poll_url.clone().ok_or_else(|| {
            Error::PollingInterrupted(
                "operation is still pending but the service sent no poll URL".to_string(),
            )
        })?;

        let deadline = tokio::time::Instant::now() + self.max_wait;
        let mut pause = operation.retry_after.unwrap_or(self.interval);
        let mut url = poll_url;

        loop {
            if tokio::time::Instant::now() + pause > deadline {
                return Err(Error::PollingInterrupted(format!(
                    "operation still pending after {}s",
                    self.max_wait.as_secs()
                )));
            }
            tokio::time::sleep(pause).await;

            debug!(url = %url, "Polling long-running operation");
            let response = self.client.execute_url(Method::GET, &url).await?;
            let step =
                LroOperation::from_response(StatusMap::new(&[200, 201, 202]), response).await?;

            pause = step.retry_after.unwrap_or(self.interval);
            if let Some(next) = step.poll_url {
                url = next;
            }

            if step.status == 202 {
                continue;
            }
            match step.body.as_ref().and_then(provisioning_state_of) {
                Some(ProvisioningState::Failed | ProvisioningState::Canceled) => {
                    return Err(terminal_failure(step.status, step.body.as_ref()));
                }
                Some(state) if !state.is_terminal() => continue,
                // Terminal success, or no state reported on a 200/201.
                _ => return Ok(step.body.unwrap_or(serde_json::Value::Null)),
            }
        }
    }
}

fn terminal_failure(status: u16, body: Option<&serde_json::Value>) -> Error {
    let error = body
        .and_then(|b| serde_json::to_vec(b).ok())
        .map_or_else(CloudError::default, |bytes| CloudError::from_body(&bytes));
    Error::Cloud { status, error }
}
