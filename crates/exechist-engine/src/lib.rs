//! exechist Engine - Orchestration layer
//!
//! Wires units of work to their history store and output registry, runs the
//! step chain around an executor, and provides the inspection commands used
//! by the CLI.

pub mod commands;
pub mod work;

pub use commands::execute_incrementally;
pub use work::{Stores, WorkUnit};
