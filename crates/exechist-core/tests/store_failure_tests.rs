#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{before_state, outputs, result, RecordingHistoryStore, RecordingOutputFiles, TestWork};
use exechist_core::errors::ExErrorKind;
use exechist_core::model::ExecutionOutcome;
use exechist_core::steps::{DefaultIncrementalContext, Step, StoreSnapshotsStep};
use std::sync::Arc;

#[test]
fn test_store_failure_is_propagated_before_registration() {
    // GIVEN a history store that cannot be written
    let work = TestWork::with_history(
        ":app:broken-store",
        RecordingHistoryStore::failing(ExErrorKind::Persistence),
    );
    let registry = Arc::new(RecordingOutputFiles::default());
    let context = DefaultIncrementalContext::new(work, Some(before_state()), None);
    let executed = result(ExecutionOutcome::Success, outputs("v1"));
    let step = StoreSnapshotsStep::new(registry.clone(), move |_: &DefaultIncrementalContext| {
        Ok(executed.clone())
    });

    // WHEN the step runs
    let err = step.execute(&context).unwrap_err();

    // THEN the storage error surfaces unmodified
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("store"));

    // AND the outputs were not registered
    assert!(registry.calls().is_empty());
}

#[test]
fn test_registry_failure_is_propagated_after_store() {
    let work = TestWork::new(":app:broken-registry");
    let registry = Arc::new(RecordingOutputFiles::failing(ExErrorKind::Io));
    let context = DefaultIncrementalContext::new(work.clone(), Some(before_state()), None);
    let executed = result(ExecutionOutcome::Success, outputs("v1"));
    let step = StoreSnapshotsStep::new(registry.clone(), move |_: &DefaultIncrementalContext| {
        Ok(executed.clone())
    });

    let err = step.execute(&context).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(err.op(), Some("record_outputs"));
    assert_eq!(work.history.stored().len(), 1);
}

#[test]
fn test_store_error_returned_when_both_would_fail() {
    let work = TestWork::with_history(
        ":app:both-broken",
        RecordingHistoryStore::failing(ExErrorKind::Persistence),
    );
    let registry = Arc::new(RecordingOutputFiles::failing(ExErrorKind::Io));
    let context = DefaultIncrementalContext::new(work, Some(before_state()), None);
    let executed = result(ExecutionOutcome::failure("boom"), outputs("v1"));
    let step = StoreSnapshotsStep::new(registry.clone(), move |_: &DefaultIncrementalContext| {
        Ok(executed.clone())
    });

    let err = step.execute(&context).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert!(registry.calls().is_empty());
}

#[test]
fn test_registry_failure_when_storing_is_skipped() {
    let work = TestWork::new(":app:skip-then-fail");
    let registry = Arc::new(RecordingOutputFiles::failing(ExErrorKind::Io));
    let context = DefaultIncrementalContext::new(work.clone(), None, None);
    let executed = result(ExecutionOutcome::Success, outputs("v1"));
    let step = StoreSnapshotsStep::new(registry.clone(), move |_: &DefaultIncrementalContext| {
        Ok(executed.clone())
    });

    let err = step.execute(&context).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Io);
    assert!(work.history.stored().is_empty());
    assert_eq!(registry.calls().len(), 1);
}
