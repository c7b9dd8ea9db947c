//! Client and data models for the `Microsoft.Network` resource provider.
//!
//! Covers the express route circuit peerings operations group.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ExpressRouteCircuitPeeringsClient;
pub use models::{
    ExpressRouteCircuitPeering, ExpressRouteCircuitPeeringProperties,
    ExpressRouteCircuitPeeringState, ExpressRouteCircuitPeeringType,
};

/// Convenient result alias that reuses the shared resource-manager error type.
pub type Result<T> = arm_core::Result<T>;
