//! Client and data models for the `Microsoft.Scheduler` resource provider.
//!
//! Covers the job collections operations group, including the polymorphic
//! HTTP authentication models whose secrets are write-only on the wire.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::JobCollectionsClient;
pub use models::{
    HttpAuthentication, JobCollection, JobCollectionProperties, JobCollectionQuota,
    JobCollectionState, JobMaxRecurrence, RecurrenceFrequency, Sku, SkuDefinition,
};

/// Convenient result alias that reuses the shared resource-manager error type.
pub type Result<T> = arm_core::Result<T>;
