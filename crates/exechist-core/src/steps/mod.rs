//! Execution step chain.
//!
//! A step receives a context, usually calls the step it wraps, and returns
//! the result of the execution. Steps that only observe the result (like
//! [`StoreSnapshotsStep`]) forward it unchanged.

pub mod store_snapshots;

pub use store_snapshots::StoreSnapshotsStep;

use crate::errors::Result;
use crate::history::ExecutionHistoryStore;
use crate::model::{
    AfterPreviousExecutionState, BeforeExecutionState, ExecutionResult, WorkIdentity,
};
use std::sync::Arc;

/// One link of the execution chain.
pub trait Step<C: ?Sized> {
    /// Run this step for `context`.
    ///
    /// # Errors
    ///
    /// Returns an error when this step or a step it wraps hits an
    /// infrastructure failure. A failed unit of work is reported through
    /// [`ExecutionResult::outcome`], not as an error.
    fn execute(&self, context: &C) -> Result<ExecutionResult>;
}

impl<C, F> Step<C> for F
where
    C: ?Sized,
    F: Fn(&C) -> Result<ExecutionResult>,
{
    fn execute(&self, context: &C) -> Result<ExecutionResult> {
        self(context)
    }
}

/// A unit of work whose executions are tracked.
pub trait UnitOfWork: Send + Sync {
    fn identity(&self) -> &WorkIdentity;

    /// History store the unit's records are written to
    fn execution_history_store(&self) -> &dyn ExecutionHistoryStore;
}

/// Context seen by steps that run after incremental state was resolved
pub trait IncrementalContext {
    fn work(&self) -> &dyn UnitOfWork;

    /// `None` when incremental tracking was not set up for this execution
    fn before_execution_state(&self) -> Option<&BeforeExecutionState>;

    /// `None` when no history exists for the unit of work
    fn after_previous_execution_state(&self) -> Option<&AfterPreviousExecutionState>;
}

/// Owned [`IncrementalContext`] assembled by the engine.
pub struct DefaultIncrementalContext {
    work: Arc<dyn UnitOfWork>,
    before_execution_state: Option<BeforeExecutionState>,
    after_previous_execution_state: Option<AfterPreviousExecutionState>,
}

impl DefaultIncrementalContext {
    pub fn new(
        work: Arc<dyn UnitOfWork>,
        before_execution_state: Option<BeforeExecutionState>,
        after_previous_execution_state: Option<AfterPreviousExecutionState>,
    ) -> Self {
        Self {
            work,
            before_execution_state,
            after_previous_execution_state,
        }
    }
}

impl IncrementalContext for DefaultIncrementalContext {
    fn work(&self) -> &dyn UnitOfWork {
        self.work.as_ref()
    }

    fn before_execution_state(&self) -> Option<&BeforeExecutionState> {
        self.before_execution_state.as_ref()
    }

    fn after_previous_execution_state(&self) -> Option<&AfterPreviousExecutionState> {
        self.after_previous_execution_state.as_ref()
    }
}

impl std::fmt::Debug for DefaultIncrementalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultIncrementalContext")
            .field("identity", self.work.identity())
            .field("before_execution_state", &self.before_execution_state.is_some())
            .field(
                "after_previous_execution_state",
                &self.after_previous_execution_state.is_some(),
            )
            .finish()
    }
}
