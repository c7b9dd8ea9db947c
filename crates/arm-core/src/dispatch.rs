//! Declarative status-code dispatch.
//!
//! Every endpoint declares the status codes that mean success; a response is
//! matched against that table exactly once. Declared codes deserialize into
//! the operation's result type, undeclared codes become a structured
//! [`Error::Cloud`] carrying the server's error payload, and a declared code
//! with an unreadable body is a [`Error::Deserialize`], a different failure
//! than the service saying no.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Declared success codes for one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct StatusMap(&'static [u16]);

impl StatusMap {
    /// Declare the given status codes as success.
    #[must_use]
    pub const fn new(codes: &'static [u16]) -> Self {
        Self(codes)
    }

    /// Whether the status code is declared.
    #[must_use]
    pub fn contains(self, status: u16) -> bool {
        self.0.contains(&status)
    }
}

/// Match a response against the declared table and deserialize the body.
///
/// Empty bodies deserialize as JSON `null`, which lets `Option<T>` and
/// unit-like results pass through 204-style responses.
///
/// # Errors
///
/// [`Error::Cloud`] for undeclared status codes, [`Error::Deserialize`] for
/// declared codes whose body does not match `T`, transport errors if the
/// body cannot be read.
pub async fn dispatch_json<T>(declared: StatusMap, response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| Error::Http(format!("Failed to read response body: {err}")))?;

    if !declared.contains(status) {
        return Err(Error::cloud(status, &bytes));
    }

    if bytes.is_empty() {
        serde_json::from_value(serde_json::Value::Null)
            .map_err(|err| Error::Deserialize(format!("empty body for status {status}: {err}")))
    } else {
        serde_json::from_slice(&bytes).map_err(|err| {
            Error::Deserialize(format!("body for status {status} did not match schema: {err}"))
        })
    }
}

/// Match a response against the declared table, discarding any body.
///
/// # Errors
///
/// [`Error::Cloud`] for undeclared status codes, transport errors if the
/// body cannot be read.
pub async fn dispatch_empty(declared: StatusMap, response: Response) -> Result<()> {
    let status = response.status().as_u16();
    if declared.contains(status) {
        return Ok(());
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| Error::Http(format!("Failed to read response body: {err}")))?;
    Err(Error::cloud(status, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        name: String,
    }

    async fn respond_with(template: ResponseTemplate) -> Response {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widget"))
            .respond_with(template)
            .mount(&server)
            .await;
        reqwest::get(format!("{}/widget", server.uri())).await.unwrap()
    }

    #[tokio::test]
    async fn declared_status_with_matching_body_succeeds() {
        let response =
            respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "w1"})))
                .await;
        let widget: Widget = dispatch_json(StatusMap::new(&[200]), response).await.unwrap();
        assert_eq!(widget, Widget { name: "w1".into() });
    }

    #[tokio::test]
    async fn undeclared_status_becomes_cloud_error() {
        let response = respond_with(
            ResponseTemplate::new(418)
                .set_body_json(serde_json::json!({"error": {"code": "Teapot", "message": "no"}})),
        )
        .await;
        let err = dispatch_json::<Widget>(StatusMap::new(&[200]), response)
            .await
            .unwrap_err();
        match err {
            Error::Cloud { status, error } => {
                assert_eq!(status, 418);
                assert_eq!(error.code, "Teapot");
            }
            other => panic!("expected Cloud error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn declared_status_with_malformed_body_is_deserialize_error() {
        let response = respond_with(ResponseTemplate::new(200).set_body_string("not json")).await;
        let err = dispatch_json::<Widget>(StatusMap::new(&[200]), response)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
    }

    #[tokio::test]
    async fn empty_body_parses_into_option() {
        let response = respond_with(ResponseTemplate::new(204)).await;
        let value: Option<Widget> = dispatch_json(StatusMap::new(&[200, 204]), response)
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn dispatch_empty_accepts_declared() {
        let response = respond_with(ResponseTemplate::new(204)).await;
        dispatch_empty(StatusMap::new(&[200, 204]), response)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn dispatch_empty_rejects_undeclared() {
        let response = respond_with(ResponseTemplate::new(409).set_body_string("")).await;
        let err = dispatch_empty(StatusMap::new(&[200, 204]), response)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
    }
}
