//! What the upstream executor hands back after running a unit of work.

use crate::model::snapshot::OutputSnapshotSet;
use exechist_core_types::BuildInvocationId;
use serde::{Deserialize, Serialize};

/// Outcome of one execution
///
/// A failure here is a normal value that drives the persistence decision,
/// not an error of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success,
    Failure { message: String },
}

impl ExecutionOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        ExecutionOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, ExecutionOutcome::Success)
    }
}

/// Who produced a result and how long it took
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginMetadata {
    pub build_invocation_id: BuildInvocationId,
    pub execution_time_ms: u64,
}

impl OriginMetadata {
    pub fn new(build_invocation_id: BuildInvocationId, execution_time_ms: u64) -> Self {
        Self {
            build_invocation_id,
            execution_time_ms,
        }
    }
}

/// Result of running a unit of work, forwarded unchanged through the step chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub outcome: ExecutionOutcome,
    /// Output fingerprints captured after the work ran
    pub final_outputs: OutputSnapshotSet,
    pub origin_metadata: OriginMetadata,
}

impl ExecutionResult {
    pub fn new(
        outcome: ExecutionOutcome,
        final_outputs: OutputSnapshotSet,
        origin_metadata: OriginMetadata,
    ) -> Self {
        Self {
            outcome,
            final_outputs,
            origin_metadata,
        }
    }
}
