//! Client and data models for the `Microsoft.Web` resource provider.
//!
//! Covers the hosting environments (App Service Environment) operations
//! group, including worker pools and metric/usage queries.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::HostingEnvironmentsClient;
pub use models::{
    HostingEnvironment, HostingEnvironmentCollection, HostingEnvironmentDiagnostics,
    HostingEnvironmentProperties, HostingEnvironmentStatus, WorkerPool, WorkerPoolCollection,
    WorkerPoolProperties, WorkerSizeOptions,
};

/// Convenient result alias that reuses the shared resource-manager error type.
pub type Result<T> = arm_core::Result<T>;
