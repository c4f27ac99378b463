//! Whether an execution's result becomes stored history.
//!
//! Successful executions are always recorded. A failed execution is only
//! recorded when there is no earlier record, or when its outputs no longer
//! match the earlier record.

use crate::changes::has_any_output_changes;
use crate::model::{
    AfterPreviousExecutionState, BeforeExecutionState, ExecutionResult, HistoryRecord, WorkIdentity,
};

/// Why a record is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreReason {
    /// The execution succeeded
    Successful,
    /// No earlier record exists for the identity
    NoPreviousExecution,
    /// The execution failed and its outputs differ from the earlier record
    OutputsChanged,
}

/// Why nothing is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Incremental tracking was not set up for this execution
    NoBeforeExecutionState,
    /// The execution failed but the outputs still match the earlier record
    OutputsUnchanged,
}

/// Result of evaluating one execution
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceDecision {
    Store {
        reason: StoreReason,
        record: HistoryRecord,
    },
    Skip {
        reason: SkipReason,
    },
}

impl PersistenceDecision {
    pub fn is_store(&self) -> bool {
        matches!(self, PersistenceDecision::Store { .. })
    }

    pub fn into_record(self) -> Option<HistoryRecord> {
        match self {
            PersistenceDecision::Store { record, .. } => Some(record),
            PersistenceDecision::Skip { .. } => None,
        }
    }
}

/// Decide whether to persist, keeping the reason for logging.
pub fn evaluate(
    identity: &WorkIdentity,
    result: &ExecutionResult,
    before: Option<&BeforeExecutionState>,
    previous: Option<&AfterPreviousExecutionState>,
) -> PersistenceDecision {
    let Some(before) = before else {
        return PersistenceDecision::Skip {
            reason: SkipReason::NoBeforeExecutionState,
        };
    };

    let reason = if result.outcome.is_successful() {
        StoreReason::Successful
    } else {
        match previous {
            None => StoreReason::NoPreviousExecution,
            Some(previous)
                if has_any_output_changes(
                    &previous.output_file_properties,
                    &result.final_outputs,
                ) =>
            {
                StoreReason::OutputsChanged
            }
            Some(_) => {
                return PersistenceDecision::Skip {
                    reason: SkipReason::OutputsUnchanged,
                }
            }
        }
    };

    PersistenceDecision::Store {
        reason,
        record: HistoryRecord::from_execution(identity.clone(), before, result),
    }
}

/// The record to write for an execution, if any.
pub fn decide(
    identity: &WorkIdentity,
    result: &ExecutionResult,
    before: Option<&BeforeExecutionState>,
    previous: Option<&AfterPreviousExecutionState>,
) -> Option<HistoryRecord> {
    evaluate(identity, result, before, previous).into_record()
}
