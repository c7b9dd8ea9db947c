//! Paged list responses.
//!
//! List endpoints answer with a `value` array and an optional `nextLink`
//! naming the following page. The link is an absolute URL and is followed
//! verbatim, without re-deriving path or query parameters.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::ArmClient;
use crate::dispatch::{dispatch_json, StatusMap};
use crate::error::Result;

/// One page of a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Items on this page. Absent in the body means an empty page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// Absolute URL of the next page, if there is one.
    #[serde(rename = "nextLink")]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// Whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_link.is_some()
    }
}

/// Fetch the page named by a `nextLink`.
///
/// # Errors
///
/// Transport errors, [`crate::Error::Cloud`] for non-200 answers, and
/// [`crate::Error::Deserialize`] for bodies that do not match the page
/// schema.
pub async fn next_page<T>(client: &ArmClient, next_link: &str) -> Result<Page<T>>
where
    T: DeserializeOwned,
{
    let response = client.execute_url(Method::GET, next_link).await?;
    dispatch_json(StatusMap::new(&[200]), response).await
}

/// Drain a paged listing into one vector, starting from the given page.
///
/// # Errors
///
/// Same failure modes as [`next_page`], surfaced from whichever page fails.
pub async fn collect_all<T>(client: &ArmClient, first: Page<T>) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let mut items = first.value;
    let mut link = first.next_link;
    while let Some(url) = link {
        let page: Page<T> = next_page(client, &url).await?;
        items.extend(page.value);
        link = page.next_link;
    }
    Ok(items)
}
