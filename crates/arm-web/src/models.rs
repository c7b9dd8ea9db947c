//! Hosting environment models for the `Microsoft.Web` provider.

use arm_core::paging::Page;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A page of hosting environments.
pub type HostingEnvironmentCollection = Page<HostingEnvironment>;

/// A page of worker pools.
pub type WorkerPoolCollection = Page<WorkerPool>;

/// An App Service Environment resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostingEnvironment {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource type, `Microsoft.Web/hostingEnvironments`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Region the environment lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Resource tags.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    /// Environment properties envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HostingEnvironmentProperties>,
}

/// Properties envelope of a [`HostingEnvironment`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingEnvironmentProperties {
    /// Environment name as reported inside the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Region, repeated inside the envelope by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Current lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HostingEnvironmentStatus>,
    /// VM size of the front-end pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_size: Option<String>,
    /// Number of front-end instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_role_count: Option<i32>,
    /// Worker pools backing the environment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_pools: Vec<WorkerPool>,
    /// DNS suffix of apps in the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_suffix: Option<String>,
    /// Provisioning state reported by the service; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// Lifecycle status of an App Service Environment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HostingEnvironmentStatus {
    /// The environment is being provisioned.
    Preparing,
    /// The environment is serving.
    Ready,
    /// A scale operation is in progress.
    Scaling,
    /// The environment is being deleted.
    Deleting,
}

/// A pool of identically sized workers, addressable as its own resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerPool {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Pool name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Region, required on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Pool properties envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<WorkerPoolProperties>,
}

/// Properties envelope of a [`WorkerPool`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerPoolProperties {
    /// Numeric pool identifier within the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_size_id: Option<i32>,
    /// VM size of the workers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_size: Option<WorkerSizeOptions>,
    /// Number of workers in the pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_count: Option<i32>,
    /// Instance names of the workers, reported by the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instance_names: Vec<String>,
}

/// Worker VM sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkerSizeOptions {
    /// Small workers.
    Small,
    /// Medium workers.
    Medium,
    /// Large workers.
    Large,
}

/// One named diagnostics payload of an environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostingEnvironmentDiagnostics {
    /// Diagnostics item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw diagnostics text. The wire field is `diagnosicsOutput`, spelled
    /// that way by the service.
    #[serde(
        rename = "diagnosicsOutput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub diagnostics_output: Option<String>,
}
