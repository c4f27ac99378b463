//! Persist execution history after the wrapped step ran.

use crate::decision::{evaluate, PersistenceDecision};
use crate::errors::Result;
use crate::model::FileCollectionFingerprint;
use crate::outputs::OutputFilesRepository;
use crate::steps::{IncrementalContext, Step};
use crate::{log_op_end, log_op_error, log_op_start};
use std::sync::Arc;
use std::time::Instant;

/// Stores the history record of an execution and registers its outputs.
///
/// The record is written to the unit's history store when the persistence
/// decision says so. The final outputs are then registered, whether or not
/// a record was stored. A failed store is returned before anything is
/// registered. The wrapped step's result is returned unchanged.
pub struct StoreSnapshotsStep<S> {
    output_files_repository: Arc<dyn OutputFilesRepository>,
    delegate: S,
}

impl<S> StoreSnapshotsStep<S> {
    pub fn new(output_files_repository: Arc<dyn OutputFilesRepository>, delegate: S) -> Self {
        Self {
            output_files_repository,
            delegate,
        }
    }
}

impl<C, S> Step<C> for StoreSnapshotsStep<S>
where
    C: IncrementalContext + ?Sized,
    S: Step<C>,
{
    fn execute(&self, context: &C) -> Result<crate::model::ExecutionResult> {
        let result = self.delegate.execute(context)?;

        let start = Instant::now();
        let work = context.work();
        let identity = work.identity();
        log_op_start!("store_snapshots", identity = %identity);

        let decision = evaluate(
            identity,
            &result,
            context.before_execution_state(),
            context.after_previous_execution_state(),
        );
        match &decision {
            PersistenceDecision::Store { reason, .. } => tracing::debug!(
                identity = %identity,
                successful = result.outcome.is_successful(),
                stored = true,
                reason = ?reason,
                "Storing execution history"
            ),
            PersistenceDecision::Skip { reason } => tracing::debug!(
                identity = %identity,
                successful = result.outcome.is_successful(),
                stored = false,
                reason = ?reason,
                "Not storing execution history"
            ),
        }

        if let Some(record) = decision.into_record() {
            if let Err(err) = work.execution_history_store().store(record) {
                log_op_error!(
                    "store_snapshots",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    identity = %identity
                );
                return Err(err);
            }
        }

        let final_outputs: Vec<&FileCollectionFingerprint> = result.final_outputs.values().collect();
        if let Err(err) = self.output_files_repository.record_outputs(&final_outputs) {
            log_op_error!(
                "store_snapshots",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                identity = %identity
            );
            return Err(err);
        }

        log_op_end!(
            "store_snapshots",
            duration_ms = start.elapsed().as_millis() as u64,
            identity = %identity,
            output_count = final_outputs.len()
        );
        Ok(result)
    }
}
