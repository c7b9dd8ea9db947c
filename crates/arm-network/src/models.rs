//! Express route circuit peering models for the `Microsoft.Network` provider.

use serde::{Deserialize, Serialize};

/// A BGP peering configured on an express route circuit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpressRouteCircuitPeering {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Peering name, unique within the circuit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Opaque change tag updated on every write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Peering properties envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ExpressRouteCircuitPeeringProperties>,
}

/// Properties envelope of an [`ExpressRouteCircuitPeering`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteCircuitPeeringProperties {
    /// Which address family and routing domain this peering serves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peering_type: Option<ExpressRouteCircuitPeeringType>,
    /// Whether the peering is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ExpressRouteCircuitPeeringState>,
    /// ASN on the Azure side of the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_asn: Option<i32>,
    /// ASN on the customer side of the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_asn: Option<i64>,
    /// Address prefix of the primary link, CIDR notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_peer_address_prefix: Option<String>,
    /// Address prefix of the secondary link, CIDR notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_peer_address_prefix: Option<String>,
    /// 802.1Q VLAN tag of the peering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<i32>,
    /// Shared key for MD5 session authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_key: Option<String>,
    /// Provisioning state reported by the service; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// Routing domain of a peering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExpressRouteCircuitPeeringType {
    /// Public Azure services.
    AzurePublicPeering,
    /// Private virtual network connectivity.
    AzurePrivatePeering,
    /// Microsoft online services.
    MicrosoftPeering,
}

/// Whether a peering is enabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExpressRouteCircuitPeeringState {
    /// The peering is configured but not active.
    Disabled,
    /// The peering is active.
    Enabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peering_parses_service_shape() {
        let body = serde_json::json!({
            "name": "AzurePrivatePeering",
            "etag": "W/\"abc\"",
            "properties": {
                "peeringType": "AzurePrivatePeering",
                "state": "Enabled",
                "azureAsn": 12076,
                "peerAsn": 65010,
                "primaryPeerAddressPrefix": "192.168.1.0/30",
                "vlanId": 200,
                "provisioningState": "Succeeded"
            }
        });
        let peering: ExpressRouteCircuitPeering = serde_json::from_value(body).unwrap();
        let props = peering.properties.unwrap();
        assert_eq!(props.peering_type, Some(ExpressRouteCircuitPeeringType::AzurePrivatePeering));
        assert_eq!(props.azure_asn, Some(12076));
        assert_eq!(props.vlan_id, Some(200));
    }

    #[test]
    fn request_body_uses_camel_case() {
        let peering = ExpressRouteCircuitPeering {
            name: Some("AzurePublicPeering".to_string()),
            properties: Some(ExpressRouteCircuitPeeringProperties {
                peering_type: Some(ExpressRouteCircuitPeeringType::AzurePublicPeering),
                peer_asn: Some(65010),
                vlan_id: Some(100),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&peering).unwrap();
        assert_eq!(json["properties"]["peeringType"], "AzurePublicPeering");
        assert_eq!(json["properties"]["vlanId"], 100);
        assert!(json["properties"].get("state").is_none());
    }
}
