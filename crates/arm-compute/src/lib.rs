//! Client and data models for the `Microsoft.Compute` resource provider.
//!
//! Provides typed structures and an asynchronous operations-group client for
//! virtual machines under Azure Resource Manager.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::VirtualMachinesClient;
pub use models::{
    Caching, DataDisk, DiskCreateOptionType, HardwareProfile, OsDisk, StorageProfile,
    VirtualHardDisk, VirtualMachine, VirtualMachineProperties,
};

/// Convenient result alias that reuses the shared resource-manager error type.
pub type Result<T> = arm_core::Result<T>;
