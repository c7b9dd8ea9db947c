//! Job collection models for the `Microsoft.Scheduler` provider.
//!
//! The HTTP authentication family is polymorphic on the wire, discriminated
//! by a `type` field. Secrets inside it are write-only: they are serialized
//! onto requests but the service never echoes them back, so deserialization
//! always leaves them `None`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// A job collection resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCollection {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource type, `Microsoft.Scheduler/jobCollections`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Region the collection lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Collection properties envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JobCollectionProperties>,
}

/// Properties envelope of a [`JobCollection`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCollectionProperties {
    /// Pricing tier of the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    /// Whether jobs in the collection run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JobCollectionState>,
    /// Limits imposed on the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<JobCollectionQuota>,
}

/// Pricing tier of a job collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sku {
    /// Tier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SkuDefinition>,
}

/// Known pricing tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SkuDefinition {
    /// Free tier.
    Free,
    /// Standard tier.
    Standard,
    /// P10 premium tier.
    P10Premium,
    /// P20 premium tier.
    P20Premium,
}

/// Whether jobs in a collection run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobCollectionState {
    /// Jobs run on schedule.
    Enabled,
    /// Jobs are stopped.
    Disabled,
    /// The collection is suspended by the service.
    Suspended,
    /// The collection is being deleted.
    Deleted,
}

/// Limits imposed on a job collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCollectionQuota {
    /// Maximum number of jobs in the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_job_count: Option<i32>,
    /// Maximum number of occurrences per job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_job_occurrence: Option<i32>,
    /// Tightest recurrence any job may request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_recurrence: Option<JobMaxRecurrence>,
}

/// Tightest recurrence a job may request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobMaxRecurrence {
    /// Unit of the recurrence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<RecurrenceFrequency>,
    /// Number of frequency units between occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i32>,
}

/// Units for job recurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceFrequency {
    /// Every `interval` minutes.
    Minute,
    /// Every `interval` hours.
    Hour,
    /// Every `interval` days.
    Day,
    /// Every `interval` weeks.
    Week,
    /// Every `interval` months.
    Month,
}

fn serialize_secret<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match secret {
        Some(value) => serializer.serialize_str(value.expose_secret()),
        None => serializer.serialize_none(),
    }
}

/// Authentication a job uses when invoking its HTTP endpoint.
///
/// Secrets (`password`, `pfx`, `secret`) are serialized onto requests but
/// never read back from responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HttpAuthentication {
    /// Username and password.
    Basic {
        /// Account to authenticate as.
        username: String,
        /// Password; write-only, responses always leave it `None`.
        #[serde(
            default,
            skip_deserializing,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_secret"
        )]
        password: Option<SecretString>,
    },
    /// Client certificate in PKCS#12 form.
    ClientCertificate {
        /// Base64-encoded pfx blob; write-only.
        #[serde(
            default,
            skip_deserializing,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_secret"
        )]
        pfx: Option<SecretString>,
        /// Password protecting the pfx; write-only.
        #[serde(
            default,
            skip_deserializing,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_secret"
        )]
        password: Option<SecretString>,
        /// Certificate thumbprint, reported by the service.
        #[serde(
            rename = "certificateThumbprint",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        certificate_thumbprint: Option<String>,
        /// Certificate expiration, reported by the service.
        #[serde(
            rename = "certificateExpiration",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        certificate_expiration: Option<String>,
    },
    /// OAuth client credentials against an Azure AD tenant.
    ActiveDirectoryOAuth {
        /// Tenant to authenticate against.
        tenant: String,
        /// Resource audience of the token.
        audience: String,
        /// Application client id.
        #[serde(rename = "clientId")]
        client_id: String,
        /// Application secret; write-only.
        #[serde(
            default,
            skip_deserializing,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_secret"
        )]
        secret: Option<SecretString>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_password_serializes_but_never_deserializes() {
        let auth = HttpAuthentication::Basic {
            username: "user1".to_string(),
            password: Some(SecretString::from("hunter2".to_owned())),
        };

        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(json["type"], "Basic");
        assert_eq!(json["password"], "hunter2");

        // Even a response that echoes a password comes back empty.
        let back: HttpAuthentication = serde_json::from_value(serde_json::json!({
            "type": "Basic",
            "username": "user1",
            "password": "hunter2"
        }))
        .unwrap();
        match back {
            HttpAuthentication::Basic { username, password } => {
                assert_eq!(username, "user1");
                assert!(password.is_none());
            }
            other => panic!("expected Basic, got {other:?}"),
        }
    }

    #[test]
    fn oauth_uses_client_id_on_the_wire() {
        let auth = HttpAuthentication::ActiveDirectoryOAuth {
            tenant: "contoso.onmicrosoft.com".to_string(),
            audience: "https://management.core.windows.net/".to_string(),
            client_id: "app-1".to_string(),
            secret: Some(SecretString::from("s3cret".to_owned())),
        };
        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(json["type"], "ActiveDirectoryOAuth");
        assert_eq!(json["clientId"], "app-1");
        assert_eq!(json["secret"], "s3cret");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let auth = HttpAuthentication::Basic {
            username: "user1".to_string(),
            password: Some(SecretString::from("hunter2".to_owned())),
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn job_collection_parses_service_shape() {
        let body = serde_json::json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Scheduler/jobCollections/jc1",
            "name": "jc1",
            "location": "northeurope",
            "properties": {
                "sku": {"name": "Standard"},
                "state": "Enabled",
                "quota": {
                    "maxJobCount": 50,
                    "maxRecurrence": {"frequency": "Minute", "interval": 1}
                }
            }
        });
        let collection: JobCollection = serde_json::from_value(body).unwrap();
        let props = collection.properties.unwrap();
        assert_eq!(props.state, Some(JobCollectionState::Enabled));
        let quota = props.quota.unwrap();
        assert_eq!(quota.max_job_count, Some(50));
        assert_eq!(
            quota.max_recurrence.unwrap().frequency,
            Some(RecurrenceFrequency::Minute)
        );
    }
}
