//! Incremental execution of a unit of work.
//!
//! ## Step chain (outermost first):
//! 1. Load the state recorded by the previous execution
//! 2. Run the executor, then store history and register outputs
//!    (`StoreSnapshotsStep`)

use exechist_core::errors::Result;
use exechist_core::model::{BeforeExecutionState, ExecutionResult};
use exechist_core::outputs::OutputFilesRepository;
use exechist_core::steps::{DefaultIncrementalContext, Step, StoreSnapshotsStep, UnitOfWork};
use exechist_core::{log_op_end, log_op_error, log_op_start};
use exechist_core_types::ExecutionId;
use std::sync::Arc;
use std::time::Instant;

/// Context before previous execution state is known
pub struct WorkContext {
    pub work: Arc<dyn UnitOfWork>,
    pub before_execution_state: Option<BeforeExecutionState>,
}

/// Loads the previous execution state from the unit's history store and
/// hands an incremental context to the wrapped step.
pub struct LoadPreviousExecutionStateStep<S> {
    delegate: S,
}

impl<S> LoadPreviousExecutionStateStep<S> {
    pub fn new(delegate: S) -> Self {
        Self { delegate }
    }
}

impl<S> Step<WorkContext> for LoadPreviousExecutionStateStep<S>
where
    S: Step<DefaultIncrementalContext>,
{
    fn execute(&self, context: &WorkContext) -> Result<ExecutionResult> {
        let work = context.work.clone();
        let previous = work.execution_history_store().load(work.identity())?;
        tracing::debug!(
            identity = %work.identity(),
            has_previous = previous.is_some(),
            "Loaded previous execution state"
        );

        let incremental = DefaultIncrementalContext::new(
            work,
            context.before_execution_state.clone(),
            previous,
        );
        self.delegate.execute(&incremental)
    }
}

/// Run `executor` for `work` and persist what it produced.
///
/// Returns the executor's result unchanged. History is stored according to
/// the persistence decision; the final outputs are always registered with
/// `outputs`.
///
/// # Errors
///
/// Returns the first infrastructure error: loading history, the executor
/// itself, storing history, or registering outputs.
pub fn execute_incrementally<E>(
    work: Arc<dyn UnitOfWork>,
    before_execution_state: Option<BeforeExecutionState>,
    executor: E,
    outputs: Arc<dyn OutputFilesRepository>,
) -> Result<ExecutionResult>
where
    E: Step<DefaultIncrementalContext>,
{
    let start = Instant::now();
    let execution_id = ExecutionId::new();
    let identity = work.identity().clone();
    log_op_start!(
        "execute_incrementally",
        identity = %identity,
        execution_id = %execution_id
    );

    let chain = LoadPreviousExecutionStateStep::new(StoreSnapshotsStep::new(outputs, executor));
    let context = WorkContext {
        work,
        before_execution_state,
    };

    match chain.execute(&context) {
        Ok(result) => {
            log_op_end!(
                "execute_incrementally",
                duration_ms = start.elapsed().as_millis() as u64,
                identity = %identity,
                execution_id = %execution_id,
                successful = result.outcome.is_successful()
            );
            Ok(result)
        }
        Err(err) => {
            log_op_error!(
                "execute_incrementally",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                identity = %identity,
                execution_id = %execution_id
            );
            Err(err)
        }
    }
}
