//! Asynchronous hosting environments operations group.

use reqwest::Method;
use tracing::debug;

use arm_core::client::ArmClient;
use arm_core::dispatch::{dispatch_empty, dispatch_json, StatusMap};
use arm_core::lro::{LroOperation, LroPoller};
use arm_core::paging::{next_page, Page};
use arm_core::request::{required_arg, QueryParams, RequestSpec, ResourcePath};

use crate::models::{
    HostingEnvironment, HostingEnvironmentCollection, HostingEnvironmentDiagnostics, WorkerPool,
    WorkerPoolCollection,
};
use crate::Result;

const API_VERSION: &str = "2015-08-01";
const PROVIDER: &str = "Microsoft.Web";

const GET_OK: StatusMap = StatusMap::new(&[200]);
const PUT_OK: StatusMap = StatusMap::new(&[200, 202]);
const DELETE_OK: StatusMap = StatusMap::new(&[200, 202, 204]);
const REBOOT_OK: StatusMap = StatusMap::new(&[202]);
const SUSPEND_OK: StatusMap = StatusMap::new(&[200, 202]);

/// Operations group for `Microsoft.Web/hostingEnvironments`.
#[derive(Debug, Clone)]
pub struct HostingEnvironmentsClient {
    client: ArmClient,
}

impl HostingEnvironmentsClient {
    /// Create the operations group over a shared client context.
    #[must_use]
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn environment_path(&self, resource_group: &str, name: &str) -> ResourcePath {
        ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("hostingEnvironments")
            .segment(name)
    }

    fn check_args(resource_group: &str, name: &str) -> Result<()> {
        required_arg("resourceGroupName", resource_group)?;
        required_arg("name", name)
    }

    /// Fetch a hosting environment.
    pub async fn get(&self, resource_group: &str, name: &str) -> Result<HostingEnvironment> {
        Self::check_args(resource_group, name)?;
        let path = self.environment_path(resource_group, name).build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Create or update a hosting environment, returning once the service
    /// has accepted the request.
    pub async fn begin_create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &HostingEnvironment,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        debug!(resource_group, name, "deploying hosting environment");
        let path = self.environment_path(resource_group, name).build();
        let spec = RequestSpec::new(Method::PUT, path, API_VERSION).with_body(envelope)?;
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(PUT_OK, response).await
    }

    /// Create or update a hosting environment and wait for provisioning to
    /// finish. These deployments routinely take a while; the wait bound of
    /// the default poller applies.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &HostingEnvironment,
    ) -> Result<HostingEnvironment> {
        let operation = self
            .begin_create_or_update(resource_group, name, envelope)
            .await?;
        self.poller().wait_for_completion(operation).await
    }

    /// Delete a hosting environment, returning once the service has
    /// accepted the request. `force_delete` removes the environment even if
    /// it still contains resources.
    pub async fn begin_delete(
        &self,
        resource_group: &str,
        name: &str,
        force_delete: Option<bool>,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        let mut query = QueryParams::new();
        query.push_opt("forceDelete", force_delete);
        let path = self.environment_path(resource_group, name).build();
        let spec = RequestSpec::new(Method::DELETE, path, API_VERSION).with_query(query);
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(DELETE_OK, response).await
    }

    /// Delete a hosting environment and wait for the deletion to finish.
    pub async fn delete(
        &self,
        resource_group: &str,
        name: &str,
        force_delete: Option<bool>,
    ) -> Result<()> {
        let operation = self
            .begin_delete(resource_group, name, force_delete)
            .await?;
        self.poller().wait_for_done(operation).await
    }

    /// List the hosting environments of a resource group. Returns the first
    /// page; follow `next_link` with [`Self::list_next`].
    pub async fn list(&self, resource_group: &str) -> Result<HostingEnvironmentCollection> {
        required_arg("resourceGroupName", resource_group)?;
        let path = ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("hostingEnvironments")
            .build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch the page named by a continuation link, verbatim.
    pub async fn list_next(&self, next_link: &str) -> Result<HostingEnvironmentCollection> {
        required_arg("nextLink", next_link)?;
        next_page(&self.client, next_link).await
    }

    /// Reboot every machine in a hosting environment. Fire-and-forget; the
    /// service acknowledges with 202 and reboots in the background.
    pub async fn reboot(&self, resource_group: &str, name: &str) -> Result<()> {
        Self::check_args(resource_group, name)?;
        let path = self.action_path(resource_group, name, "reboot");
        let spec = RequestSpec::new(Method::POST, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_empty(REBOOT_OK, response).await
    }

    /// Suspend a hosting environment, returning the accepted handle.
    pub async fn begin_suspend(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "suspend").await
    }

    /// Suspend a hosting environment and wait for completion. The service
    /// answers with the collection of affected sites, left untyped.
    pub async fn suspend(&self, resource_group: &str, name: &str) -> Result<serde_json::Value> {
        let operation = self.begin_suspend(resource_group, name).await?;
        self.poller().wait_for_completion(operation).await
    }

    /// Resume a suspended hosting environment, returning the accepted
    /// handle.
    pub async fn begin_resume(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "resume").await
    }

    /// Resume a suspended hosting environment and wait for completion.
    pub async fn resume(&self, resource_group: &str, name: &str) -> Result<serde_json::Value> {
        let operation = self.begin_resume(resource_group, name).await?;
        self.poller().wait_for_completion(operation).await
    }

    /// List the diagnostics items of an environment.
    pub async fn list_diagnostics(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Vec<HostingEnvironmentDiagnostics>> {
        Self::check_args(resource_group, name)?;
        let path = self.action_path(resource_group, name, "diagnostics");
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch a single diagnostics item by name.
    pub async fn get_diagnostics_item(
        &self,
        resource_group: &str,
        name: &str,
        item: &str,
    ) -> Result<HostingEnvironmentDiagnostics> {
        Self::check_args(resource_group, name)?;
        required_arg("diagnosticsName", item)?;
        let path = self
            .environment_path(resource_group, name)
            .segment("diagnostics")
            .segment(item)
            .build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Query metrics of an environment. `details` expands per-instance
    /// breakdowns; `filter` is an OData `$filter` passed through verbatim.
    /// Metric rows are service-defined and left untyped.
    pub async fn list_metrics(
        &self,
        resource_group: &str,
        name: &str,
        details: Option<bool>,
        filter: Option<&str>,
    ) -> Result<Page<serde_json::Value>> {
        Self::check_args(resource_group, name)?;
        let mut query = QueryParams::new();
        query.push_opt("details", details);
        query.push_opt("$filter", filter);
        let path = self.action_path(resource_group, name, "metrics");
        let spec = RequestSpec::new(Method::GET, path, API_VERSION).with_query(query);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Query usage quotas of an environment, optionally filtered with an
    /// OData `$filter`. Rows are service-defined and left untyped.
    pub async fn list_usages(
        &self,
        resource_group: &str,
        name: &str,
        filter: Option<&str>,
    ) -> Result<Page<serde_json::Value>> {
        Self::check_args(resource_group, name)?;
        let mut query = QueryParams::new();
        query.push_opt("$filter", filter);
        let path = self.action_path(resource_group, name, "usages");
        let spec = RequestSpec::new(Method::GET, path, API_VERSION).with_query(query);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// List the in-flight operations of an environment. The service leaves
    /// this endpoint unschematized, so the body is passed through as raw
    /// JSON.
    pub async fn list_operations(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<serde_json::Value> {
        Self::check_args(resource_group, name)?;
        let path = self.action_path(resource_group, name, "operations");
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// List the worker pools of an environment.
    pub async fn list_worker_pools(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<WorkerPoolCollection> {
        Self::check_args(resource_group, name)?;
        let path = self.action_path(resource_group, name, "workerPools");
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch a single worker pool by name.
    pub async fn get_worker_pool(
        &self,
        resource_group: &str,
        name: &str,
        pool: &str,
    ) -> Result<WorkerPool> {
        Self::check_args(resource_group, name)?;
        required_arg("workerPoolName", pool)?;
        let path = self.worker_pool_path(resource_group, name, pool);
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Create or resize a worker pool, returning once the service has
    /// accepted the request.
    pub async fn begin_create_or_update_worker_pool(
        &self,
        resource_group: &str,
        name: &str,
        pool: &str,
        envelope: &WorkerPool,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        required_arg("workerPoolName", pool)?;
        let path = self.worker_pool_path(resource_group, name, pool);
        let spec = RequestSpec::new(Method::PUT, path, API_VERSION).with_body(envelope)?;
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(PUT_OK, response).await
    }

    /// Create or resize a worker pool and wait for completion.
    pub async fn create_or_update_worker_pool(
        &self,
        resource_group: &str,
        name: &str,
        pool: &str,
        envelope: &WorkerPool,
    ) -> Result<WorkerPool> {
        let operation = self
            .begin_create_or_update_worker_pool(resource_group, name, pool, envelope)
            .await?;
        self.poller().wait_for_completion(operation).await
    }

    /// List the multi-role pools of an environment. The service models the
    /// front-end pool with the same shape as a worker pool.
    pub async fn list_multi_role_pools(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<WorkerPoolCollection> {
        Self::check_args(resource_group, name)?;
        let path = self.action_path(resource_group, name, "multiRolePools");
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch the multi-role pool of an environment. Each environment has
    /// exactly one, addressed as `default`.
    pub async fn get_multi_role_pool(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<WorkerPool> {
        Self::check_args(resource_group, name)?;
        let path = self.multi_role_pool_path(resource_group, name);
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Resize the multi-role pool, returning once the service has accepted
    /// the request.
    pub async fn begin_create_or_update_multi_role_pool(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &WorkerPool,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        let path = self.multi_role_pool_path(resource_group, name);
        let spec = RequestSpec::new(Method::PUT, path, API_VERSION).with_body(envelope)?;
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(PUT_OK, response).await
    }

    /// Resize the multi-role pool and wait for completion.
    pub async fn create_or_update_multi_role_pool(
        &self,
        resource_group: &str,
        name: &str,
        envelope: &WorkerPool,
    ) -> Result<WorkerPool> {
        let operation = self
            .begin_create_or_update_multi_role_pool(resource_group, name, envelope)
            .await?;
        self.poller().wait_for_completion(operation).await
    }

    fn action_path(&self, resource_group: &str, name: &str, action: &str) -> String {
        self.environment_path(resource_group, name)
            .segment(action)
            .build()
    }

    fn worker_pool_path(&self, resource_group: &str, name: &str, pool: &str) -> String {
        self.environment_path(resource_group, name)
            .segment("workerPools")
            .segment(pool)
            .build()
    }

    fn multi_role_pool_path(&self, resource_group: &str, name: &str) -> String {
        self.environment_path(resource_group, name)
            .segment("multiRolePools")
            .segment("default")
            .build()
    }

    async fn begin_action(
        &self,
        resource_group: &str,
        name: &str,
        action: &str,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        let path = self.action_path(resource_group, name, action);
        let spec = RequestSpec::new(Method::POST, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(SUSPEND_OK, response).await
    }

    fn poller(&self) -> LroPoller {
        LroPoller::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arm_core::ids::SubscriptionId;
    use arm_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path_regex, query_param};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn client_for(server: &MockServer) -> HostingEnvironmentsClient {
        let client = ArmClient::builder(SubscriptionId::new_v4())
            .with_endpoint(server.uri())
            .build()
            .unwrap();
        HostingEnvironmentsClient::new(client)
    }

    /// Answers the pending template a fixed number of times, then the final
    /// one. Used to script a poll sequence.
    struct Sequenced {
        remaining: Arc<AtomicUsize>,
        pending: ResponseTemplate,
        done: ResponseTemplate,
    }

    impl Respond for Sequenced {
        fn respond(&self, _request: &Request) -> ResponseTemplate {
            if self.remaining.fetch_sub(1, Ordering::SeqCst) > 0 {
                self.pending.clone()
            } else {
                self.done.clone()
            }
        }
    }

    #[tokio::test]
    async fn get_returns_environment_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(
                r"/resourceGroups/rg1/providers/Microsoft\.Web/hostingEnvironments/ase1$",
            ))
            .and(query_param("api-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "ase1",
                "location": "East US",
                "properties": {"status": "Ready"}
            })))
            .mount(&server)
            .await;

        let environment = client_for(&server).get("rg1", "ase1").await.unwrap();
        assert_eq!(environment.name.as_deref(), Some("ase1"));
    }

    #[tokio::test]
    async fn get_maps_404_to_cloud_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/hostingEnvironments/ase1$"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get("rg1", "ase1").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn empty_name_fails_before_any_request() {
        let server = MockServer::start().await;
        let err = client_for(&server).get("", "ase1").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(m) if m.contains("resourceGroupName")));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn begin_create_or_update_returns_on_202() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path_regex(r"/hostingEnvironments/ase1$"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", "https://example.test/poll/ase1"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let operation = client_for(&server)
            .begin_create_or_update("rg1", "ase1", &HostingEnvironment::default())
            .await
            .unwrap();
        assert!(operation.accepted());
        assert_eq!(operation.poll_url(), Some("https://example.test/poll/ase1"));
    }

    #[tokio::test]
    async fn create_or_update_polls_location_to_terminal_state() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path_regex(r"/hostingEnvironments/ase1$"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", format!("{}/poll/ase1", server.uri()).as_str())
                    .insert_header("Retry-After", "0"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/poll/ase1$"))
            .respond_with(Sequenced {
                remaining: Arc::new(AtomicUsize::new(2)),
                pending: ResponseTemplate::new(202)
                    .insert_header("Retry-After", "0"),
                done: ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "name": "ase1",
                    "properties": {"status": "Ready", "provisioningState": "Succeeded"}
                })),
            })
            .expect(3)
            .mount(&server)
            .await;

        let environment = client_for(&server)
            .create_or_update("rg1", "ase1", &HostingEnvironment::default())
            .await
            .unwrap();
        assert_eq!(
            environment.properties.unwrap().provisioning_state.as_deref(),
            Some("Succeeded")
        );
    }

    #[tokio::test]
    async fn delete_passes_force_delete_query() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"/hostingEnvironments/ase1$"))
            .and(query_param("forceDelete", "true"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete("rg1", "ase1", Some(true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn reboot_accepts_202_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"/hostingEnvironments/ase1/reboot$"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        client_for(&server).reboot("rg1", "ase1").await.unwrap();
    }

    #[tokio::test]
    async fn list_metrics_passes_odata_filter_through() {
        let server = MockServer::start().await;
        let filter = "(name.value eq 'CPU') and startTime eq '2015-01-01'";
        Mock::given(method("GET"))
            .and(path_regex(r"/hostingEnvironments/ase1/metrics$"))
            .and(query_param("details", "true"))
            .and(query_param("$filter", filter))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": {"value": "CPU"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list_metrics("rg1", "ase1", Some(true), Some(filter))
            .await
            .unwrap();
        assert_eq!(page.value.len(), 1);
    }

    #[tokio::test]
    async fn worker_pool_put_round_trips_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path_regex(r"/hostingEnvironments/ase1/workerPools/pool1$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "pool1",
                "properties": {"workerSize": "Medium", "workerCount": 3}
            })))
            .mount(&server)
            .await;

        let pool = client_for(&server)
            .create_or_update_worker_pool("rg1", "ase1", "pool1", &WorkerPool::default())
            .await
            .unwrap();
        assert_eq!(
            pool.properties.unwrap().worker_size,
            Some(crate::models::WorkerSizeOptions::Medium)
        );
    }

    #[tokio::test]
    async fn multi_role_pool_is_addressed_as_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/hostingEnvironments/ase1/multiRolePools/default$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "default",
                "properties": {"workerSize": "Large", "workerCount": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pool = client_for(&server)
            .get_multi_role_pool("rg1", "ase1")
            .await
            .unwrap();
        assert_eq!(pool.properties.unwrap().worker_count, Some(2));
    }

    #[tokio::test]
    async fn list_multi_role_pools_returns_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/hostingEnvironments/ase1/multiRolePools$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": "default"}]
            })))
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list_multi_role_pools("rg1", "ase1")
            .await
            .unwrap();
        assert_eq!(page.value.len(), 1);
    }

    #[tokio::test]
    async fn multi_role_pool_put_round_trips_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path_regex(r"/hostingEnvironments/ase1/multiRolePools/default$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "default",
                "properties": {"workerSize": "Large", "workerCount": 4}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pool = client_for(&server)
            .create_or_update_multi_role_pool("rg1", "ase1", &WorkerPool::default())
            .await
            .unwrap();
        assert_eq!(
            pool.properties.unwrap().worker_size,
            Some(crate::models::WorkerSizeOptions::Large)
        );
    }

    #[tokio::test]
    async fn list_operations_is_opaque_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/hostingEnvironments/ase1/operations$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "op-1", "status": "InProgress"}
            ])))
            .mount(&server)
            .await;

        let operations = client_for(&server)
            .list_operations("rg1", "ase1")
            .await
            .unwrap();
        assert_eq!(operations[0]["id"], "op-1");
    }

    #[tokio::test]
    async fn suspend_resolves_untyped_site_collection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"/hostingEnvironments/ase1/suspend$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": "site1"}]
            })))
            .mount(&server)
            .await;

        let sites = client_for(&server).suspend("rg1", "ase1").await.unwrap();
        assert_eq!(sites["value"][0]["name"], "site1");
    }
}
