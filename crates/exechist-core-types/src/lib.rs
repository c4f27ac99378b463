//! Core types shared across exechist facilities
//!
//! This crate provides foundational types used by the error handling and
//! logging facilities as well as the persistence backends:
//!
//! - **Correlation types**: BuildInvocationId, ExecutionId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{BuildInvocationId, ExecutionId};
