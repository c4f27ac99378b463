//! exechist Core - Execution history persistence kernel
//!
//! This crate decides whether the result of a unit of work becomes stored
//! execution history, and registers the outputs it produced:
//! - Fingerprint and snapshot models for outputs and inputs
//! - Output change detection between two snapshot sets
//! - The persistence decision and the `StoreSnapshotsStep` that applies it
//! - History store and output registry contracts with in-memory backends
//! - Error and structured logging facilities shared by the workspace

pub mod changes;
pub mod decision;
pub mod digest;
pub mod errors;
pub mod history;
pub mod logging_facility;
pub mod model;
pub mod outputs;
pub mod steps;

// Re-export commonly used types
pub use changes::has_any_output_changes;
pub use decision::{decide, evaluate, PersistenceDecision, SkipReason, StoreReason};
pub use errors::{ExError, ExErrorKind, HistoryError, Result};
pub use history::{ExecutionHistoryStore, InMemoryExecutionHistoryStore};
pub use model::{
    AfterPreviousExecutionState, BeforeExecutionState, ExecutionOutcome, ExecutionResult,
    FileCollectionFingerprint, HistoryRecord, OriginMetadata, OutputSnapshotSet, WorkIdentity,
};
pub use outputs::{InMemoryOutputFilesRepository, OutputFilesRepository, OutputMark};
pub use steps::{DefaultIncrementalContext, IncrementalContext, Step, StoreSnapshotsStep, UnitOfWork};
