//! Asynchronous job collections operations group.

use reqwest::Method;
use tracing::debug;

use arm_core::client::ArmClient;
use arm_core::dispatch::{dispatch_json, StatusMap};
use arm_core::lro::{LroOperation, LroPoller};
use arm_core::paging::{next_page, Page};
use arm_core::request::{required_arg, RequestSpec, ResourcePath};

use crate::models::JobCollection;
use crate::Result;

const API_VERSION: &str = "2016-03-01";
const PROVIDER: &str = "Microsoft.Scheduler";

const GET_OK: StatusMap = StatusMap::new(&[200]);
const PUT_OK: StatusMap = StatusMap::new(&[200, 201]);
const PATCH_OK: StatusMap = StatusMap::new(&[200]);
const DELETE_OK: StatusMap = StatusMap::new(&[200, 202, 204]);
const ACTION_OK: StatusMap = StatusMap::new(&[200, 202]);

/// Operations group for `Microsoft.Scheduler/jobCollections`.
#[derive(Debug, Clone)]
pub struct JobCollectionsClient {
    client: ArmClient,
}

impl JobCollectionsClient {
    /// Create the operations group over a shared client context.
    #[must_use]
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn collection_path(&self, resource_group: &str, name: &str) -> String {
        ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("jobCollections")
            .segment(name)
            .build()
    }

    fn check_args(resource_group: &str, name: &str) -> Result<()> {
        required_arg("resourceGroupName", resource_group)?;
        required_arg("jobCollectionName", name)
    }

    /// Fetch a job collection.
    pub async fn get(&self, resource_group: &str, name: &str) -> Result<JobCollection> {
        Self::check_args(resource_group, name)?;
        let spec = RequestSpec::new(
            Method::GET,
            self.collection_path(resource_group, name),
            API_VERSION,
        );
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Create or replace a job collection. Completes in the initial
    /// exchange; the service answers 200 or 201 with the stored resource.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        collection: &JobCollection,
    ) -> Result<JobCollection> {
        Self::check_args(resource_group, name)?;
        let spec = RequestSpec::new(
            Method::PUT,
            self.collection_path(resource_group, name),
            API_VERSION,
        )
        .with_body(collection)?;
        let response = self.client.execute(&spec).await?;
        dispatch_json(PUT_OK, response).await
    }

    /// Patch fields of an existing job collection.
    pub async fn patch(
        &self,
        resource_group: &str,
        name: &str,
        collection: &JobCollection,
    ) -> Result<JobCollection> {
        Self::check_args(resource_group, name)?;
        let spec = RequestSpec::new(
            Method::PATCH,
            self.collection_path(resource_group, name),
            API_VERSION,
        )
        .with_body(collection)?;
        let response = self.client.execute(&spec).await?;
        dispatch_json(PATCH_OK, response).await
    }

    /// Delete a job collection, returning once the service has accepted
    /// the request.
    pub async fn begin_delete(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        let spec = RequestSpec::new(
            Method::DELETE,
            self.collection_path(resource_group, name),
            API_VERSION,
        );
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(DELETE_OK, response).await
    }

    /// Delete a job collection and wait for the deletion to finish.
    pub async fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_delete(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// Enable all jobs in a collection, returning the accepted handle.
    pub async fn begin_enable(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "enable").await
    }

    /// Enable all jobs in a collection and wait for completion.
    pub async fn enable(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_enable(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// Disable all jobs in a collection, returning the accepted handle.
    pub async fn begin_disable(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "disable").await
    }

    /// Disable all jobs in a collection and wait for completion.
    pub async fn disable(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_disable(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// List the job collections of a resource group. Returns the first
    /// page; follow `next_link` with [`Self::list_next`].
    pub async fn list_by_resource_group(&self, resource_group: &str) -> Result<Page<JobCollection>> {
        required_arg("resourceGroupName", resource_group)?;
        let path = ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("jobCollections")
            .build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch the page named by a continuation link, verbatim.
    pub async fn list_next(&self, next_link: &str) -> Result<Page<JobCollection>> {
        required_arg("nextLink", next_link)?;
        next_page(&self.client, next_link).await
    }

    async fn begin_action(
        &self,
        resource_group: &str,
        name: &str,
        action: &str,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        debug!(resource_group, name, action, "job collection state change");
        let path = format!("{}/{action}", self.collection_path(resource_group, name));
        let spec = RequestSpec::new(Method::POST, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(ACTION_OK, response).await
    }

    fn poller(&self) -> LroPoller {
        LroPoller::new(self.client.clone())
    }
}
