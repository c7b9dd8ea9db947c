//! Asynchronous express route circuit peerings operations group.

use reqwest::Method;
use tracing::debug;

use arm_core::client::ArmClient;
use arm_core::dispatch::{dispatch_json, StatusMap};
use arm_core::lro::{LroOperation, LroPoller};
use arm_core::paging::{next_page, Page};
use arm_core::request::{required_arg, RequestSpec, ResourcePath};

use crate::models::ExpressRouteCircuitPeering;
use crate::Result;

const API_VERSION: &str = "2015-06-15";
const PROVIDER: &str = "Microsoft.Network";

const GET_OK: StatusMap = StatusMap::new(&[200]);
const PUT_OK: StatusMap = StatusMap::new(&[200, 201, 202]);
const DELETE_OK: StatusMap = StatusMap::new(&[200, 202, 204]);

/// Operations group for peerings under
/// `Microsoft.Network/expressRouteCircuits/{circuit}`.
#[derive(Debug, Clone)]
pub struct ExpressRouteCircuitPeeringsClient {
    client: ArmClient,
}

impl ExpressRouteCircuitPeeringsClient {
    /// Create the operations group over a shared client context.
    #[must_use]
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn circuit_path(&self, resource_group: &str, circuit: &str) -> ResourcePath {
        ResourcePath::subscription(self.client.subscription_id())
            .resource_group(resource_group)
            .provider(PROVIDER)
            .segment("expressRouteCircuits")
            .segment(circuit)
            .segment("peerings")
    }

    fn check_args(resource_group: &str, circuit: &str, peering: &str) -> Result<()> {
        required_arg("resourceGroupName", resource_group)?;
        required_arg("circuitName", circuit)?;
        required_arg("peeringName", peering)
    }

    /// Fetch a single peering of a circuit.
    pub async fn get(
        &self,
        resource_group: &str,
        circuit: &str,
        peering: &str,
    ) -> Result<ExpressRouteCircuitPeering> {
        Self::check_args(resource_group, circuit, peering)?;
        let path = self
            .circuit_path(resource_group, circuit)
            .segment(peering)
            .build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Create or update a peering, returning once the service has accepted
    /// the request.
    pub async fn begin_create_or_update(
        &self,
        resource_group: &str,
        circuit: &str,
        peering: &str,
        parameters: &ExpressRouteCircuitPeering,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, circuit, peering)?;
        debug!(resource_group, circuit, peering, "configuring circuit peering");
        let path = self
            .circuit_path(resource_group, circuit)
            .segment(peering)
            .build();
        let spec = RequestSpec::new(Method::PUT, path, API_VERSION).with_body(parameters)?;
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(PUT_OK, response).await
    }

    /// Create or update a peering and wait for provisioning to finish.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        circuit: &str,
        peering: &str,
        parameters: &ExpressRouteCircuitPeering,
    ) -> Result<ExpressRouteCircuitPeering> {
        let operation = self
            .begin_create_or_update(resource_group, circuit, peering, parameters)
            .await?;
        LroPoller::new(self.client.clone())
            .wait_for_completion(operation)
            .await
    }

    /// Delete a peering, returning once the service has accepted the
    /// request.
    pub async fn begin_delete(
        &self,
        resource_group: &str,
        circuit: &str,
        peering: &str,
    ) -> Result<LroOperation> {
        Self::check_args(resource_group, circuit, peering)?;
        let path = self
            .circuit_path(resource_group, circuit)
            .segment(peering)
            .build();
        let spec = RequestSpec::new(Method::DELETE, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        LroOperation::from_response(DELETE_OK, response).await
    }

    /// Delete a peering and wait for the deletion to finish.
    pub async fn delete(&self, resource_group: &str, circuit: &str, peering: &str) -> Result<()> {
        let operation = self.begin_delete(resource_group, circuit, peering).await?;
        LroPoller::new(self.client.clone())
            .wait_for_done(operation)
            .await
    }

    /// List the peerings of a circuit. Returns the first page; follow
    /// `next_link` with [`Self::list_next`].
    pub async fn list(
        &self,
        resource_group: &str,
        circuit: &str,
    ) -> Result<Page<ExpressRouteCircuitPeering>> {
        required_arg("resourceGroupName", resource_group)?;
        required_arg("circuitName", circuit)?;
        let path = self.circuit_path(resource_group, circuit).build();
        let spec = RequestSpec::new(Method::GET, path, API_VERSION);
        let response = self.client.execute(&spec).await?;
        dispatch_json(GET_OK, response).await
    }

    /// Fetch the page named by a continuation link, verbatim.
    pub async fn list_next(&self, next_link: &str) -> Result<Page<ExpressRouteCircuitPeering>> {
        required_arg("nextLink", next_link)?;
        next_page(&self.client, next_link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arm_core::ids::SubscriptionId;
    use arm_core::Error;
    use wiremock::matchers::{body_json_string, method, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ExpressRouteCircuitPeeringsClient {
        let client = ArmClient::builder(SubscriptionId::new_v4())
            .with_endpoint(server.uri())
            .build()
            .unwrap();
        ExpressRouteCircuitPeeringsClient::new(client)
    }

    #[tokio::test]
    async fn get_hits_the_nested_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(
                r"/providers/Microsoft\.Network/expressRouteCircuits/erc1/peerings/AzurePrivatePeering$",
            ))
            .and(query_param("api-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "AzurePrivatePeering",
                "properties": {"vlanId": 200}
            })))
            .mount(&server)
            .await;

        let peering = client_for(&server)
            .get("rg1", "erc1", "AzurePrivatePeering")
            .await
            .unwrap();
        assert_eq!(peering.properties.unwrap().vlan_id, Some(200));
    }

    #[tokio::test]
    async fn empty_circuit_name_fails_before_any_request() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .get("rg1", "", "AzurePrivatePeering")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(m) if m.contains("circuitName")));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_or_update_sends_camel_case_body() {
        let server = MockServer::start().await;
        let parameters = ExpressRouteCircuitPeering {
            name: Some("p1".to_string()),
            properties: Some(crate::models::ExpressRouteCircuitPeeringProperties {
                vlan_id: Some(300),
                ..Default::default()
            }),
            ..Default::default()
        };
        let expected = serde_json::to_string(&parameters).unwrap();
        Mock::given(method("PUT"))
            .and(path_regex(r"/peerings/p1$"))
            .and(body_json_string(expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "p1",
                "properties": {"vlanId": 300, "provisioningState": "Succeeded"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .create_or_update("rg1", "erc1", "p1", &parameters)
            .await
            .unwrap();
        assert_eq!(result.name.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn delete_accepts_204() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"/peerings/p1$"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        client_for(&server).delete("rg1", "erc1", "p1").await.unwrap();
    }

    #[tokio::test]
    async fn list_returns_page_with_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/expressRouteCircuits/erc1/peerings$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": "p1"}],
                "nextLink": "https://example.test/page2"
            })))
            .mount(&server)
            .await;

        let page = client_for(&server).list("rg1", "erc1").await.unwrap();
        assert_eq!(page.value.len(), 1);
        assert_eq!(page.next_link.as_deref(), Some("https://example.test/page2"));
    }
}
