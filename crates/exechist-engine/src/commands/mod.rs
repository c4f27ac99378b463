//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate between
//! core domain logic and persistence layer.

pub mod execute;
pub mod inspect;

pub use execute::{execute_incrementally, LoadPreviousExecutionStateStep, WorkContext};
pub use inspect::{check_output, list_history, remove_history, show_history, OutputStatus};
