//! # arm-core
//!
//! Core types and HTTP plumbing for Azure Resource Manager (ARM) clients.
//!
//! This crate provides the shared client context, error taxonomy, response
//! dispatch, long-running-operation polling, and pagination primitives used
//! by the per-provider client crates (`arm-compute`, `arm-network`,
//! `arm-scheduler`, `arm-web`).
//!
//! ## Modules
//!
//! - [`error`] - Error types and the ARM `CloudError` wire payload
//! - [`ids`] - Strongly-typed identifier wrappers (subscription id)
//! - [`request`] - Request descriptions, provider paths, query parameters
//! - [`client`] - The shared [`client::ArmClient`] context and transport
//! - [`dispatch`] - Declarative status-code dispatch tables
//! - [`lro`] - Long-running-operation handles and the shared poller
//! - [`paging`] - Paged collections and continuation-link follow-up
//! - [`config`] - Declarative client configuration
//! - [`credentials`] - Token credential seam for the transport

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod lro;
pub mod paging;
pub mod request;

// Re-export commonly used types
pub use error::{CloudError, Error, Result};
