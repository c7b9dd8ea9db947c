//! Asynchronous virtual machines operations group.

use reqwest::Method;
use tracing::debug;

use arm_core::client::ArmClient;
use arm_core::dispatch::{dispatch_json, StatusMap};
use arm_core::lro::{LroOperation, LroPoller};
use arm_core::paging::{next_page, Page};
use arm_core::request::{required_arg, QueryParams, RequestSpec, ResourcePath};

use crate::models::VirtualMachine;
use crate::Result;

const API_VERSION: &str = "2016-03-30";
const PROVIDER: &str = "Microsoft.Compute";

const GET_OK: StatusMap = StatusMap::new(&[200]);
const PUT_OK: StatusMap = StatusMap::new(&[200, 201, 202]);
const DELETE_OK: StatusMap = StatusMap::new(&[202, 204]);
const ACTION_OK: StatusMap = StatusMap::new(&[202]);

/// Operations group for `Microsoft.Compute/virtualMachines`.
#[derive(Debug, Clone)]
pub struct VirtualMachinesClient {
    client: ArmClient,
}

impl VirtualMachinesClient {
    /// Create the operations group over a shared client context.
    #[must_use]
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn vm_path(&self, resource_group: &str, name: &str) -> String {
        ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("virtualMachines")
            .segment(name)
            .build()
    }

    fn check_args(resource_group: &str, name: &str) -> Result<()> {
        required_arg("resourceGroupName", resource_group)?;
        required_arg("vmName", name)
    }

    /// Fetch a virtual machine. Pass `Some("instanceView")` as `expand` to
    /// include the runtime instance view.
    pub async fn get(
        &self,
        resource_group: &str,
        name: &str,
        expand: Option<&str>,
    ) -> Result<VirtualMachine> {
        Self::check_args(resource_group, name)?;
        let mut query = QueryParams::new();
        query.push_opt("$expand", expand);
        let spec = RequestSpec::new(Method::GET, self.vm_path(resource_group, name), API_VERSION)
            .with_query(query);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Create or update a virtual machine, returning once the service has
    /// accepted the request.
    pub async fn begin_create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        machine: &VirtualMachine,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        debug!(resource_group, name, "deploying virtual machine");
        let spec = RequestSpec::new(Method::PUT, self.vm_path(resource_group, name), API_VERSION)
            .with_body(machine)?;
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(PUT_OK, response).await
    }

    /// Create or update a virtual machine and wait for provisioning to
    /// finish.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        machine: &VirtualMachine,
    ) -> Result<VirtualMachine> {
        let operation = self
            .begin_create_or_update(resource_group, name, machine)
            .await?;
        self.poller().wait_for_completion(operation).await
    }

    /// Delete a virtual machine, returning once the service has accepted
    /// the request.
    pub async fn begin_delete(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        Self::check_args(resource_group, name)?;
        let spec = RequestSpec::new(
            Method::DELETE,
            self.vm_path(resource_group, name),
            API_VERSION,
        );
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(DELETE_OK, response).await
    }

    /// Delete a virtual machine and wait for the deletion to finish.
    pub async fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_delete(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// Start a stopped virtual machine, returning the accepted handle.
    pub async fn begin_start(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "start").await
    }

    /// Start a stopped virtual machine and wait for it to be running.
    pub async fn start(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_start(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// Restart a virtual machine, returning the accepted handle.
    pub async fn begin_restart(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "restart").await
    }

    /// Restart a virtual machine and wait for it to come back.
    pub async fn restart(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_restart(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// Stop a virtual machine and release its compute resources, returning
    /// the accepted handle.
    pub async fn begin_deallocate(&self, resource_group: &str, name: &str) -> Result<LroOperation> {
        self.begin_action(resource_group, name, "deallocate").await
    }

    /// Stop a virtual machine and release its compute resources, waiting
    /// for completion.
    pub async fn deallocate(&self, resource_group: &str, name: &str) -> Result<()> {
        let operation = self.begin_deallocate(resource_group, name).await?;
        self.poller().wait_for_done(operation).await
    }

    /// List the virtual machines of a resource group. Returns the first
    /// page; follow `next_link` with [`Self::list_next`].
    pub async fn list(&self, resource_group: &str) -> Result<Page<VirtualMachine>> {
        required_arg("resourceGroupName", resource_group)?;
        let path = ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("virtualMachines")
            .build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch the page named by a continuation link, verbatim.
    pub async fn list_next(&self, next_link: &str) -> Result<Page<VirtualMachine>> {
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
        debug!(resource_group, name, action, "virtual machine power action");
        let path = format!("{}/{action}", self.vm_path(resource_group, name));
        let spec = RequestSpec::new(Method::POST, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(ACTION_OK, response).await
    }

    fn poller(&self) -> LroPoller {
        LroPoller::new(self.client.clone())
    }
}
